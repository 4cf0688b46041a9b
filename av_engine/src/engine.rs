/// AV Engine - Singleton manager for the renderer and the logger
///
/// This module provides global singleton management for the renderer backend
/// and the logging subsystem. It uses thread-safe static storage with RwLock
/// for safe concurrent access.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{OnceLock, RwLock, Arc, Mutex};
use std::time::SystemTime;
use crate::renderer::Renderer;
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Renderer singleton as stored by the engine
pub type SharedRenderer = Arc<Mutex<dyn Renderer + Send>>;

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Minimum severity forwarded to the logger (ERROR is always forwarded)
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogSeverity::Info as u8);

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Renderer singleton (wrapped in Mutex for thread-safe mutable access)
    renderer: RwLock<Option<SharedRenderer>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            renderer: RwLock::new(None),
        }
    }
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// Owns the renderer singleton and brackets its lifecycle: the renderer is
/// initialized when registered and deinitialized when destroyed, so
/// `Renderer::initialize` / `Renderer::deinitialize` run exactly once each.
///
/// # Example
///
/// ```ignore
/// use av_engine::av::Engine;
/// use av_engine_renderer_opengl::GlRenderer;
///
/// Engine::initialize()?;
/// Engine::create_renderer(GlRenderer::new(gl, Default::default()))?;
///
/// let renderer = Engine::renderer()?;
/// // renderer.lock().unwrap().flush_command_buffer(&cmd)?;
///
/// Engine::shutdown();
/// # Ok::<(), av_engine::av::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Log errors before returning them (internal use)
    fn log_and_return_error(error: Error) -> Error {
        crate::engine_error!("av::Engine", "{}", error);
        error
    }

    fn state() -> Result<&'static EngineState> {
        ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))
    }

    /// Initialize the engine
    ///
    /// Must be called once at application startup before creating the renderer.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Shutdown the engine, deinitializing and dropping the renderer singleton
    pub fn shutdown() {
        if Self::destroy_renderer().is_err() {
            crate::engine_warn!("av::Engine", "Renderer did not shut down cleanly");
        }
    }

    /// Initialize a renderer and register it as the global singleton
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A renderer already exists
    /// - `Renderer::initialize` fails (the renderer is then dropped)
    pub fn create_renderer<R: Renderer + Send + 'static>(mut renderer: R) -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.renderer.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Renderer lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("Renderer already exists. Call Engine::destroy_renderer() first.".to_string())
            ));
        }

        renderer.initialize()?;
        *lock = Some(Arc::new(Mutex::new(renderer)));

        crate::engine_info!("av::Engine", "Renderer singleton created successfully");
        Ok(())
    }

    /// Get the renderer singleton
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized or no renderer exists.
    pub fn renderer() -> Result<SharedRenderer> {
        let state = Self::state()?;

        let lock = state.renderer.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Renderer lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Renderer not created. Call Engine::create_renderer() first.".to_string())
            ))
    }

    /// Deinitialize and remove the renderer singleton
    ///
    /// Does nothing if no renderer is registered.
    pub fn destroy_renderer() -> Result<()> {
        let state = Self::state()?;

        let renderer = {
            let mut lock = state.renderer.write()
                .map_err(|_| Self::log_and_return_error(
                    Error::BackendError("Renderer lock poisoned".to_string())
                ))?;
            lock.take()
        };

        if let Some(renderer) = renderer {
            let mut guard = renderer.lock()
                .map_err(|_| Self::log_and_return_error(
                    Error::BackendError("Renderer mutex poisoned".to_string())
                ))?;
            guard.deinitialize()?;
            crate::engine_info!("av::Engine", "Renderer singleton destroyed");
        }

        Ok(())
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut renderer) = state.renderer.write() {
                *renderer = None;
            }
        }
        Self::set_log_level(LogSeverity::Info);
        Self::reset_logger();
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// # Example
    ///
    /// ```no_run
    /// use av_engine::av::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Set the minimum severity forwarded to the logger
    ///
    /// Defaults to `Info`. Set to `Trace` to see every command recorded and
    /// decoded.
    pub fn set_log_level(level: LogSeverity) {
        LOG_LEVEL.store(level as u8, Ordering::Relaxed);
    }

    /// Current minimum severity
    pub fn log_level() -> LogSeverity {
        LogSeverity::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
    }

    /// Whether a message of this severity would reach the logger
    pub fn log_enabled(severity: LogSeverity) -> bool {
        severity == LogSeverity::Error || severity as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }

    /// Internal logging method with file:line information (for ERROR logs)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }

    fn dispatch(entry: LogEntry) {
        if !Self::log_enabled(entry.severity) {
            return;
        }
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&entry);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
