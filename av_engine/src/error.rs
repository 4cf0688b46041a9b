//! Error types for the AV engine
//!
//! This module defines the error type shared by the command buffer codec,
//! the dispatch loop and the renderer backends.

use std::fmt;

/// Result type for AV engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// AV engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL object creation, etc.)
    BackendError(String),

    /// Invalid resource (stale handle, malformed mesh data, empty shader source)
    InvalidResource(String),

    /// Initialization failed or lifecycle misuse (renderer, engine singleton)
    InitializationFailed(String),

    /// A command could not be recorded into a command buffer
    EncodingError(String),

    /// A command buffer could not be decoded
    DecodingError(String),

    /// Uniform data type or shape not supported by the backend
    UnsupportedUniform(String),

    /// Shader compilation or program linking failed (carries the backend log)
    ShaderCompilationFailed(String),

    /// A draw or uniform command was executed with no shader bound
    NoShaderBound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::EncodingError(msg) => write!(f, "Command encoding error: {}", msg),
            Error::DecodingError(msg) => write!(f, "Command decoding error: {}", msg),
            Error::UnsupportedUniform(msg) => write!(f, "Unsupported uniform: {}", msg),
            Error::ShaderCompilationFailed(msg) => write!(f, "Shader compilation failed: {}", msg),
            Error::NoShaderBound(msg) => write!(f, "No shader bound: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR message and build an `Error::BackendError` from it
///
/// # Example
///
/// ```no_run
/// # use av_engine::engine_err;
/// let err = engine_err!("av::opengl", "Failed to create buffer: {}", "out of handles");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::av::Error::BackendError(message)
    }};
}

/// Log an ERROR message and return early with an `Error::BackendError`
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

impl Error {
    /// Log this error at ERROR severity and hand it back
    ///
    /// Used where a specific variant is raised, so the failure is recorded
    /// at the point it happens:
    ///
    /// ```no_run
    /// # use av_engine::av::Error;
    /// let err = Error::InvalidResource("mesh is not live".to_string()).logged("av::opengl");
    /// ```
    #[track_caller]
    pub fn logged(self, source: &str) -> Self {
        let location = std::panic::Location::caller();
        crate::engine::Engine::log_detailed(
            crate::log::LogSeverity::Error,
            source,
            self.to_string(),
            location.file(),
            location.line(),
        );
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
