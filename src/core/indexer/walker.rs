//! Output tree walker.
//!
//! Finds the rendered pages of a documentation build. Patterns are
//! matched against paths relative to the output root (`ru/guide/*.html`)
//! and against bare names (`*.html`, `node_modules`). Hidden
//! directories and the record output directory are never entered.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{DocIndexError, Result};

/// Page finder for one output tree layout
pub struct FileWalker {
    /// Pages must match one of these (all files when empty)
    include: Vec<Pattern>,

    /// Directories and pages matching these are skipped
    exclude: Vec<Pattern>,

    /// Directories below the root holding generated output, not pages
    output_dirs: Vec<PathBuf>,

    max_page_bytes: u64,
}

fn compile(patterns: Vec<String>, kind: &str) -> Result<Vec<Pattern>> {
    patterns
        .into_iter()
        .map(|p| {
            Pattern::new(&p).map_err(|e| {
                DocIndexError::ConfigError(format!("Invalid {kind} pattern '{p}': {e}"))
            })
        })
        .collect()
}

/// `/`-separated form of a root-relative path
fn slash_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

impl FileWalker {
    /// Invalid patterns are reported as `ConfigError`.
    pub fn new(
        include_patterns: Vec<String>,
        exclude_patterns: Vec<String>,
        max_file_size_mb: usize,
    ) -> Result<Self> {
        Ok(Self {
            include: compile(include_patterns, "include")?,
            exclude: compile(exclude_patterns, "exclude")?,
            output_dirs: Vec::new(),
            max_page_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        })
    }

    /// Never descend into `dir`, given relative to the output root
    pub fn skip_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dirs.push(dir.into());
        self
    }

    /// Collect all pages below `root`, sorted by path
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(DocIndexError::ConfigError(format!(
                "Output directory does not exist: {root:?}"
            )));
        }

        let mut pages = Vec::new();
        let walk = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_enter(e, root));

        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            if !self.is_page(relative) {
                continue;
            }

            match entry.metadata() {
                Ok(metadata) if metadata.len() > self.max_page_bytes => {
                    tracing::warn!(
                        "Skipping large page: {} ({} bytes)",
                        slash_path(relative),
                        metadata.len()
                    );
                }
                _ => pages.push(entry.into_path()),
            }
        }

        pages.sort();
        Ok(pages)
    }

    /// Directories are entered unless hidden, generated output or
    /// excluded. Files always pass; they are filtered by `is_page`.
    fn should_enter(&self, entry: &DirEntry, root: &Path) -> bool {
        if !entry.file_type().is_dir() {
            return true;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            return false;
        };

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            return false;
        }
        if self.output_dirs.iter().any(|dir| dir == relative) {
            tracing::debug!("Skipping output directory {}", slash_path(relative));
            return false;
        }
        if self.is_excluded(relative, &name) {
            tracing::debug!("Skipping excluded directory {}", slash_path(relative));
            return false;
        }
        true
    }

    fn is_page(&self, relative: &Path) -> bool {
        let path = slash_path(relative);
        let name = relative
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        let included = self.include.is_empty()
            || self
                .include
                .iter()
                .any(|p| p.matches(&path) || p.matches(&name));

        included && !self.is_excluded(relative, &name)
    }

    fn is_excluded(&self, relative: &Path, name: &str) -> bool {
        let path = slash_path(relative);
        self.exclude
            .iter()
            .any(|p| p.matches(&path) || p.matches(name))
    }
}
