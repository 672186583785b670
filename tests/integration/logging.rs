//! Integration tests for file logging.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_DATA_DIR: when using file mode, the directory of the log file (default "./logs")
//!   Refer to `src/logging/mod.rs` for more details.
use ballot_relayer::logging::{compute_rolled_file_path, setup_logging, space_based_rolling};
use chrono::Utc;
use std::{
    env, fs,
    fs::{create_dir_all, remove_dir_all},
    path::Path,
    sync::Mutex,
    thread,
    time::Duration,
};
use tempfile::TempDir;

use lazy_static::lazy_static;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

// Global lazy_static that initializes logging only once.
lazy_static! {
    // This will call setup_logging() the first time INIT_LOGGING is dereferenced.
    static ref INIT_LOGGING: () = {
        setup_logging();
    };
}

// This test checks if the LOG_MAX_SIZE environment variable is set to a valid u64 value.
#[test]
#[should_panic(expected = "LOG_MAX_SIZE must be a valid u64 if set")]
fn test_invalid_log_max_size() {
    let _guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    // Create a unique temporary directory.
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_log_dir = temp_dir.path().to_str().unwrap();

    // Set LOG_MAX_SIZE to an invalid value.
    env::set_var("LOG_MODE", "file");
    env::set_var("LOG_LEVEL", "debug");
    env::set_var("LOG_DATA_DIR", format!("{}/", temp_log_dir));
    env::set_var("LOG_MAX_SIZE", "invalid_value");

    // Initialize separate from lazy static.
    setup_logging();
}

// This integration test simulates file logging in file mode.
#[test]
fn test_setup_logging_file_mode_creates_log_file() {
    let _guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    // Create a unique temporary directory.
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_log_dir = temp_dir.path().to_str().unwrap();

    // Unset env var to ensure default values are used and not to interfere with the test.
    env::remove_var("LOG_MAX_SIZE");
    env::set_var("LOG_MODE", "file");
    env::set_var("LOG_LEVEL", "debug");
    env::set_var("LOG_DATA_DIR", format!("{}/", temp_log_dir));

    // Clean up any previous logs and create the log directory.
    let _ = remove_dir_all(temp_log_dir);
    create_dir_all(temp_log_dir).expect("Failed to create log directory");

    // Force the lazy_static to initialize logging.
    *INIT_LOGGING;

    // Sleep for the logger to flush.
    thread::sleep(Duration::from_millis(200));

    // Compute expected file path using UTC date.
    let now = Utc::now();
    let date_str = now.format("%Y-%m-%d").to_string();
    let expected_path: String = {
        let base = format!("{}/ballot-relayer.log", temp_log_dir);
        compute_rolled_file_path(&base, &date_str, 1)
    };

    assert!(
        Path::new(&expected_path).exists(),
        "Expected log file {} does not exist",
        expected_path
    );
}

/// Simulates a pre-existing, oversized log file and verifies that the
/// computed final path rolls over to a new file name.
#[test]
fn test_log_file_rolls_when_existing() {
    let _guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    // Create a temporary directory for logs.
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_log_dir = temp_dir.path();

    fs::create_dir_all(temp_log_dir).expect("Failed to create log directory");

    let now = Utc::now();
    let date_str = now.format("%Y-%m-%d").to_string();

    let base_file = temp_log_dir.join("ballot-relayer.log");
    let dated_file = compute_rolled_file_path(base_file.to_str().unwrap(), &date_str, 1);

    fs::write(&dated_file, "Existing log file").expect("Failed to create pre-existing log file");

    let max_size = 10; // bytes
    let rolled_path =
        space_based_rolling(&dated_file, base_file.to_str().unwrap(), &date_str, max_size);

    // The rolled path should differ from the dated file and keep the stem.
    assert_ne!(
        rolled_path, dated_file,
        "Expected rolled log file path to differ from the dated file path"
    );
    assert!(
        rolled_path.contains("ballot-relayer-"),
        "Expected rolled log file path to contain 'ballot-relayer-'"
    );
}

#[test]
fn test_space_based_rolling_returns_original_when_under_max_size() {
    // Create a temporary directory.
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_log_dir = temp_dir.path().to_str().unwrap();

    let base_file_path = format!("{}/test_relayer.log", temp_log_dir);
    let now = Utc::now();
    let date_str = now.format("%Y-%m-%d").to_string();
    let dated_path = compute_rolled_file_path(&base_file_path, &date_str, 1);

    // Create a file with content under max_size.
    fs::write(&dated_path, "small file").expect("Failed to create test log file");

    let max_size: u64 = 10_000;
    let rolled_file_path = space_based_rolling(&dated_path, &base_file_path, &date_str, max_size);

    // Since the file size is under max_size, it should return the original file path.
    assert_eq!(
        rolled_file_path, dated_path,
        "space_based_rolling should return the original file path when within size threshold"
    );
}
