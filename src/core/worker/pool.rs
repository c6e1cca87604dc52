//! Worker pool coordinator.
//!
//! Workers are OS threads, each fed through its own
//! `crossbeam-channel` inbox. Replies and exit notifications flow
//! back over one `tokio::sync::mpsc` channel to the coordinator, a
//! single tokio task that exclusively owns the task queue, the
//! result set and per-worker bookkeeping. The [`WorkerPool`] handle
//! only sends commands to the coordinator.
//!
//! A worker whose processor returns `Err` replies with an `error`
//! message and stays alive. A worker whose processor panics is a
//! crash: its in-flight task is lost (counted in
//! [`PoolStats::lost`]) and a replacement worker is spawned.

use crossbeam_channel::{Receiver, Sender};
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tokio::sync::{mpsc, oneshot};

use crate::core::error::{DocIndexError, Result};
use crate::core::types::{Document, ResultSet};
use crate::core::worker::processor::{process_document, DocumentProcessor};
use crate::core::worker::protocol::WorkerMessage;

/// Counters describing the work a pool has seen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Live workers; drops when a crashed worker cannot be replaced
    pub workers: usize,

    /// Tasks accepted by `add_task`
    pub submitted: usize,

    /// Tasks that produced a `result` message
    pub completed: usize,

    /// Tasks that produced an `error` message
    pub failed: usize,

    /// Tasks that never produced a message (worker crash or shutdown)
    pub lost: usize,

    /// Workers spawned to replace crashed ones
    pub replaced: usize,
}

impl PoolStats {
    /// Tasks with a known outcome, lost ones included
    pub fn settled(&self) -> usize {
        self.completed + self.failed + self.lost
    }
}

/// Number of workers for a requested maximum.
///
/// Leaves one CPU for the coordinator and never goes below one.
pub fn pool_size(requested: usize, available: usize) -> usize {
    requested.min(available.saturating_sub(1)).max(1)
}

enum PoolCommand {
    AddTask(Document),
    Wait(oneshot::Sender<Result<ResultSet>>),
    Stats(oneshot::Sender<PoolStats>),
    Terminate(oneshot::Sender<PoolStats>),
}

enum WorkerEvent {
    Message { worker: usize, message: WorkerMessage },
    Exited { worker: usize, crashed: bool },
}

/// Handle to a running worker pool
///
/// Dropping the handle shuts the pool down as if
/// [`WorkerPool::terminate`] had been called.
pub struct WorkerPool {
    commands: mpsc::UnboundedSender<PoolCommand>,
    live_workers: Arc<AtomicUsize>,
    terminated: AtomicBool,
}

impl WorkerPool {
    /// Start a pool of `pool_size(max_workers, CPUs)` workers.
    ///
    /// Must be called from within a tokio runtime.
    pub fn initialize(max_workers: usize, processor: Arc<dyn DocumentProcessor>) -> Result<Self> {
        Self::spawn(pool_size(max_workers, num_cpus::get()), processor)
    }

    /// Start a pool of exactly `size` workers.
    ///
    /// Fails with `WorkerSpawn` when `size` is zero, when no tokio
    /// runtime is running, or when a worker thread cannot be
    /// started. No workers survive a failed start.
    pub fn spawn(size: usize, processor: Arc<dyn DocumentProcessor>) -> Result<Self> {
        if size == 0 {
            return Err(DocIndexError::WorkerSpawn(
                "Pool size must be non-zero".to_string(),
            ));
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            DocIndexError::WorkerSpawn(format!("Worker pool requires a tokio runtime: {e}"))
        })?;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut workers = BTreeMap::new();
        for id in 0..size {
            // On error the inboxes of already spawned workers are
            // dropped, which stops them.
            let slot = spawn_worker(id, &processor, &events_tx)?;
            workers.insert(id, slot);
        }

        let live_workers = Arc::new(AtomicUsize::new(size));
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let coordinator = Coordinator {
            processor,
            workers,
            live_workers: Arc::clone(&live_workers),
            next_id: size,
            queue: VecDeque::new(),
            results: ResultSet::new(),
            stats: PoolStats {
                workers: size,
                ..PoolStats::default()
            },
            waiter: None,
            events: events_tx,
        };
        runtime.spawn(coordinator.run(commands_rx, events_rx));

        tracing::info!("Worker pool started with {} workers", size);

        Ok(Self {
            commands: commands_tx,
            live_workers,
            terminated: AtomicBool::new(false),
        })
    }

    /// Number of live workers
    pub fn size(&self) -> usize {
        self.live_workers.load(Ordering::SeqCst)
    }

    /// Queue a document for processing. Never blocks.
    pub fn add_task(&self, document: Document) -> Result<()> {
        if self.terminated.load(Ordering::SeqCst) {
            return Err(DocIndexError::PoolTerminated);
        }
        self.send(PoolCommand::AddTask(document))
    }

    /// Wait until the queue is drained and no task is in flight,
    /// then return a snapshot of the result set.
    ///
    /// Only one caller may wait at a time; a second concurrent
    /// waiter gets `WaiterPending`.
    pub async fn wait_for_completion(&self) -> Result<ResultSet> {
        let (reply, response) = oneshot::channel();
        self.send(PoolCommand::Wait(reply))?;
        response.await.map_err(|_| DocIndexError::PoolTerminated)?
    }

    /// Current counters
    pub async fn stats(&self) -> Result<PoolStats> {
        let (reply, response) = oneshot::channel();
        self.send(PoolCommand::Stats(reply))?;
        response.await.map_err(|_| DocIndexError::PoolTerminated)
    }

    /// Stop every worker and return the final counters.
    ///
    /// Queued tasks and tasks still running are counted as lost. A
    /// pending waiter receives `PoolTerminated`.
    pub async fn terminate(&self) -> Result<PoolStats> {
        if self.terminated.swap(true, Ordering::SeqCst) {
            return Err(DocIndexError::PoolTerminated);
        }
        let (reply, response) = oneshot::channel();
        self.commands
            .send(PoolCommand::Terminate(reply))
            .map_err(|_| DocIndexError::PoolTerminated)?;
        response.await.map_err(|_| DocIndexError::PoolTerminated)
    }

    fn send(&self, command: PoolCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| DocIndexError::PoolTerminated)
    }
}

struct WorkerSlot {
    inbox: Sender<WorkerMessage>,
    thread: Option<JoinHandle<()>>,
    /// Path of the document in flight
    task: Option<String>,
}

fn spawn_worker(
    id: usize,
    processor: &Arc<dyn DocumentProcessor>,
    events: &mpsc::UnboundedSender<WorkerEvent>,
) -> Result<WorkerSlot> {
    let (inbox, messages) = crossbeam_channel::unbounded();
    let processor = Arc::clone(processor);
    let events = events.clone();

    let thread = thread::Builder::new()
        .name(format!("docindex-worker-{id}"))
        .spawn(move || run_worker(id, messages, events, processor))
        .map_err(|e| DocIndexError::WorkerSpawn(format!("Failed to spawn worker {id}: {e}")))?;

    tracing::debug!("Spawned worker {}", id);

    Ok(WorkerSlot {
        inbox,
        thread: Some(thread),
        task: None,
    })
}

/// Reports the worker's exit, including exits by panic
struct ExitGuard {
    worker: usize,
    events: mpsc::UnboundedSender<WorkerEvent>,
}

impl Drop for ExitGuard {
    fn drop(&mut self) {
        let _ = self.events.send(WorkerEvent::Exited {
            worker: self.worker,
            crashed: thread::panicking(),
        });
    }
}

fn run_worker(
    id: usize,
    messages: Receiver<WorkerMessage>,
    events: mpsc::UnboundedSender<WorkerEvent>,
    processor: Arc<dyn DocumentProcessor>,
) {
    let _guard = ExitGuard {
        worker: id,
        events: events.clone(),
    };

    for message in messages.iter() {
        let reply = match message {
            WorkerMessage::Process(document) => process_document(processor.as_ref(), &document),
            WorkerMessage::Terminate => break,
            other => WorkerMessage::Error {
                message: format!("Unexpected {} message", other.kind()),
                stack: None,
            },
        };

        if events
            .send(WorkerEvent::Message {
                worker: id,
                message: reply,
            })
            .is_err()
        {
            break;
        }
    }
}

struct Coordinator {
    processor: Arc<dyn DocumentProcessor>,
    workers: BTreeMap<usize, WorkerSlot>,
    /// Shared with the handle for `WorkerPool::size`
    live_workers: Arc<AtomicUsize>,
    next_id: usize,
    queue: VecDeque<Document>,
    results: ResultSet,
    stats: PoolStats,
    waiter: Option<oneshot::Sender<Result<ResultSet>>>,
    /// Handed to replacement workers
    events: mpsc::UnboundedSender<WorkerEvent>,
}

impl Coordinator {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<PoolCommand>,
        mut events: mpsc::UnboundedReceiver<WorkerEvent>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(PoolCommand::Terminate(reply)) => {
                        commands.close();
                        let stats = self.shutdown();
                        let _ = reply.send(stats);
                        break;
                    }
                    Some(command) => self.handle_command(command),
                    None => {
                        self.shutdown();
                        break;
                    }
                },
                Some(event) = events.recv() => self.handle_event(event),
            }
        }
    }

    fn handle_command(&mut self, command: PoolCommand) {
        match command {
            PoolCommand::AddTask(document) => {
                tracing::debug!("Queued {} ({})", document.path, document.lang);
                self.queue.push_back(document);
                self.stats.submitted += 1;
                self.dispatch();
            }
            PoolCommand::Wait(reply) => {
                if self.waiter.as_ref().is_some_and(|w| !w.is_closed()) {
                    let _ = reply.send(Err(DocIndexError::WaiterPending));
                    return;
                }
                self.waiter = Some(reply);
                self.check_completion();
            }
            PoolCommand::Stats(reply) => {
                let _ = reply.send(self.stats.clone());
            }
            PoolCommand::Terminate(_) => unreachable!("terminate is handled by the run loop"),
        }
    }

    fn handle_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Message { worker, message } => self.handle_message(worker, message),
            WorkerEvent::Exited { worker, crashed } => self.handle_exit(worker, crashed),
        }
    }

    fn handle_message(&mut self, worker: usize, message: WorkerMessage) {
        let task = self
            .workers
            .get_mut(&worker)
            .and_then(|slot| slot.task.take())
            .unwrap_or_default();

        match message {
            WorkerMessage::Result { records } => {
                self.stats.completed += 1;
                tracing::debug!(
                    "Worker {} finished {} ({} records)",
                    worker,
                    task,
                    records.len()
                );
                self.results.merge(records);
            }
            WorkerMessage::Error { message, .. } => {
                self.stats.failed += 1;
                tracing::warn!("Worker {} failed to process {}: {}", worker, task, message);
            }
            other => {
                self.stats.failed += 1;
                tracing::warn!(
                    "Worker {} sent unexpected {} message for {}",
                    worker,
                    other.kind(),
                    task
                );
            }
        }

        self.dispatch_to(worker);
        self.check_completion();
    }

    fn handle_exit(&mut self, worker: usize, crashed: bool) {
        let Some(slot) = self.workers.remove(&worker) else {
            return;
        };

        if let Some(task) = slot.task {
            self.stats.lost += 1;
            tracing::error!("Worker {} exited while processing {}; task lost", worker, task);
        }
        if crashed {
            tracing::error!("Worker {} crashed, spawning replacement", worker);
        } else {
            tracing::warn!("Worker {} exited unexpectedly, spawning replacement", worker);
        }
        // The thread is already unwinding or returning; detach it.
        drop(slot.thread);

        let id = self.next_id;
        self.next_id += 1;
        let spawned = spawn_worker(id, &self.processor, &self.events);
        self.install_replacement(worker, id, spawned);

        self.dispatch();
        self.check_completion();
    }

    fn install_replacement(&mut self, old: usize, id: usize, spawned: Result<WorkerSlot>) {
        match spawned {
            Ok(replacement) => {
                self.workers.insert(id, replacement);
                self.stats.replaced += 1;
            }
            Err(e) => tracing::error!(
                "Failed to replace worker {}: {}; continuing with {} workers",
                old,
                e,
                self.workers.len()
            ),
        }
        self.stats.workers = self.workers.len();
        self.live_workers
            .store(self.workers.len(), Ordering::SeqCst);
    }

    /// Hand queued tasks to every idle worker
    fn dispatch(&mut self) {
        if self.workers.is_empty() {
            self.drop_queue("no workers left");
            return;
        }

        let idle: Vec<usize> = self
            .workers
            .iter()
            .filter(|(_, slot)| slot.task.is_none())
            .map(|(id, _)| *id)
            .collect();

        for id in idle {
            if self.queue.is_empty() {
                break;
            }
            self.dispatch_to(id);
        }
    }

    fn dispatch_to(&mut self, worker: usize) {
        let Some(slot) = self.workers.get_mut(&worker) else {
            return;
        };
        if slot.task.is_some() {
            return;
        }
        let Some(document) = self.queue.pop_front() else {
            return;
        };

        let path = document.path.clone();
        match slot.inbox.send(WorkerMessage::Process(document)) {
            Ok(()) => {
                tracing::debug!("Dispatched {} to worker {}", path, worker);
                slot.task = Some(path);
            }
            Err(crossbeam_channel::SendError(message)) => {
                // Worker is gone; its exit event triggers a replacement.
                tracing::warn!("Worker {} unavailable, requeueing {}", worker, path);
                if let WorkerMessage::Process(document) = message {
                    self.queue.push_front(document);
                }
            }
        }
    }

    fn check_completion(&mut self) {
        let busy = self.workers.values().any(|slot| slot.task.is_some());
        if !self.queue.is_empty() || busy {
            return;
        }
        if let Some(waiter) = self.waiter.take() {
            tracing::debug!(
                "Pool idle: {} completed, {} failed, {} lost",
                self.stats.completed,
                self.stats.failed,
                self.stats.lost
            );
            let _ = waiter.send(Ok(self.results.clone()));
        }
    }

    fn drop_queue(&mut self, reason: &str) {
        if self.queue.is_empty() {
            return;
        }
        let dropped = self.queue.len();
        self.stats.lost += dropped;
        self.queue.clear();
        tracing::error!("Dropped {} queued tasks: {}", dropped, reason);
    }

    fn shutdown(&mut self) -> PoolStats {
        self.drop_queue("pool terminated");

        for slot in self.workers.values() {
            let _ = slot.inbox.send(WorkerMessage::Terminate);
        }

        for (id, mut slot) in std::mem::take(&mut self.workers) {
            match slot.task.take() {
                Some(task) => {
                    self.stats.lost += 1;
                    tracing::warn!("Worker {} still processing {}; detaching", id, task);
                }
                None => {
                    if let Some(thread) = slot.thread.take() {
                        if thread.join().is_err() {
                            tracing::warn!("Worker {} panicked during shutdown", id);
                        }
                    }
                }
            }
        }

        if let Some(waiter) = self.waiter.take() {
            let _ = waiter.send(Err(DocIndexError::PoolTerminated));
        }

        tracing::info!(
            "Worker pool terminated: {} submitted, {} completed, {} failed, {} lost, {} replaced",
            self.stats.submitted,
            self.stats.completed,
            self.stats.failed,
            self.stats.lost,
            self.stats.replaced
        );

        self.stats.clone()
    }
}
