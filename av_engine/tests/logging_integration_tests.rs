//! Integration tests for Engine logging system
//!
//! These tests verify the logging system through the public API.
//! No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use av_engine::av::Engine;
use av_engine::av::log::{Logger, LogEntry, LogSeverity};
use av_engine::av::render::CommandBuffer;
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn restore_defaults() {
    Engine::reset_logger();
    Engine::set_log_level(LogSeverity::Info);
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].severity, LogSeverity::Info);
    assert_eq!(captured[0].source, "test::module");
    assert_eq!(captured[0].message, "Test info message");
    assert_eq!(captured[1].severity, LogSeverity::Warn);
    drop(captured);

    restore_defaults();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].file, Some("test_file.rs"));
    assert_eq!(captured[0].line, Some(42));
    drop(captured);

    restore_defaults();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());
    Engine::reset_logger();
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());

    assert_eq!(entries.lock().unwrap().len(), 1);
    restore_defaults();
}

#[test]
#[serial]
fn test_integration_default_level_drops_trace_and_debug() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    Engine::set_log_level(LogSeverity::Info);

    Engine::log(LogSeverity::Trace, "test", "Trace message".to_string());
    Engine::log(LogSeverity::Debug, "test", "Debug message".to_string());
    Engine::log(LogSeverity::Info, "test", "Info message".to_string());
    Engine::log(LogSeverity::Error, "test", "Error message".to_string());

    let severities: Vec<LogSeverity> = entries.lock().unwrap().iter().map(|e| e.severity).collect();
    assert_eq!(severities, vec![LogSeverity::Info, LogSeverity::Error]);

    restore_defaults();
}

#[test]
#[serial]
fn test_integration_trace_level_shows_recording() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);
    Engine::set_log_level(LogSeverity::Trace);

    let mut cmd = CommandBuffer::new();
    cmd.cmd_uniform_f32("exposure", 1.0).unwrap();
    cmd.end().unwrap();

    let captured = entries.lock().unwrap();
    assert!(captured.iter().any(|e| e.source == "av::CommandBuffer"
        && e.severity == LogSeverity::Trace
        && e.message.contains("Uniform")));
    drop(captured);

    restore_defaults();
}
