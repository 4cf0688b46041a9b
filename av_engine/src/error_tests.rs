//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("glCreateBuffer returned 0".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("glCreateBuffer returned 0"));
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("mesh handle is not live".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("mesh handle is not live"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("renderer already initialized".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("renderer already initialized"));
}

#[test]
fn test_encoding_error_display() {
    let err = Error::EncodingError("uniform name is 300 bytes".to_string());
    assert_eq!(format!("{}", err), "Command encoding error: uniform name is 300 bytes");
}

#[test]
fn test_decoding_error_display() {
    let err = Error::DecodingError("unknown command tag 0x42".to_string());
    assert_eq!(format!("{}", err), "Command decoding error: unknown command tag 0x42");
}

#[test]
fn test_unsupported_uniform_display() {
    let err = Error::UnsupportedUniform("Int32 2x3".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Unsupported uniform"));
    assert!(display.contains("Int32 2x3"));
}

#[test]
fn test_shader_compilation_failed_display() {
    let err = Error::ShaderCompilationFailed("0:1(1): error: syntax error".to_string());
    let display = format!("{}", err);
    assert!(display.starts_with("Shader compilation failed"));
    assert!(display.contains("syntax error"));
}

#[test]
fn test_no_shader_bound_display() {
    let err = Error::NoShaderBound("DrawMesh".to_string());
    assert_eq!(format!("{}", err), "No shader bound: DrawMesh");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::DecodingError("truncated".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let debug1 = format!("{:?}", Error::BackendError("test".to_string()));
    assert!(debug1.contains("BackendError"));

    let debug2 = format!("{:?}", Error::UnsupportedUniform("shape".to_string()));
    assert!(debug2.contains("UnsupportedUniform"));

    let debug3 = format!("{:?}", Error::NoShaderBound("Uniform".to_string()));
    assert!(debug3.contains("NoShaderBound"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::ShaderCompilationFailed("link error".to_string());
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

#[test]
fn test_error_logged_returns_same_error() {
    let err = Error::InvalidResource("stale".to_string()).logged("av::test");
    assert!(matches!(err, Error::InvalidResource(ref msg) if msg == "stale"));
}

// ============================================================================
// RESULT TYPE
// ============================================================================

fn fails() -> Result<u32> {
    Err(Error::EncodingError("nope".to_string()))
}

fn propagates() -> Result<u32> {
    let value = fails()?;
    Ok(value + 1)
}

#[test]
fn test_result_propagation() {
    let result = propagates();
    assert!(matches!(result, Err(Error::EncodingError(_))));
}

#[test]
fn test_engine_err_macro_builds_backend_error() {
    let err = crate::engine_err!("av::test", "buffer {} failed", 7);
    match err {
        Error::BackendError(msg) => assert_eq!(msg, "buffer 7 failed"),
        other => panic!("unexpected error: {:?}", other),
    }
}

fn bails(flag: bool) -> Result<()> {
    if flag {
        crate::engine_bail!("av::test", "flag was {}", flag);
    }
    Ok(())
}

#[test]
fn test_engine_bail_macro_returns_early() {
    assert!(bails(false).is_ok());
    assert!(matches!(bails(true), Err(Error::BackendError(_))));
}
