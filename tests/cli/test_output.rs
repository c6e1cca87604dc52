//! Tests for CLI output formatting helpers
//!
//! - Byte formatting (B, KB, MB)
//! - Duration formatting (ms, s, m)
//! - Print helpers

use docindex::cli::output::{format_bytes, format_duration, print_success, print_warning};

/// Test byte formatting with various sizes
#[test]
fn test_format_bytes_various_sizes() {
    assert_eq!(format_bytes(0), "0 B");
    assert_eq!(format_bytes(1023), "1023 B");
    assert_eq!(format_bytes(1024), "1.0 KB");
    assert_eq!(format_bytes(10240), "10.0 KB");
    assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
}

/// Test duration formatting thresholds
#[test]
fn test_format_duration_thresholds() {
    assert_eq!(format_duration(0.0), "0ms");
    assert_eq!(format_duration(0.25), "250ms");
    assert_eq!(format_duration(1.0), "1.00s");
    assert_eq!(format_duration(59.5), "59.50s");
    assert_eq!(format_duration(60.0), "1m 0.0s");
    assert_eq!(format_duration(125.0), "2m 5.0s");
}

/// Print helpers don't panic
#[test]
fn test_print_helpers() {
    print_success("Indexed");
    print_warning("2 tasks lost");
}
