/*!
# AV Engine

Core types and traits for the AV rendering hardware-abstraction layer.

Application code records drawing operations into a renderer-agnostic
[`CommandBuffer`](renderer::CommandBuffer). A backend (such as the OpenGL
backend in `av_engine_renderer_opengl`) later replays the buffer through
[`Renderer::flush_command_buffer`](renderer::Renderer::flush_command_buffer).

## Architecture

- **CommandBuffer**: append-only binary encoder of commands
- **CommandBufferReader**: decoder paired with the encoder
- **ResourceStore**: generation-checked mesh and shader storage, handing out
  `MeshHandle` / `ShaderHandle` keys
- **CommandExecutor**: backend GPU actions driven by the dispatch loop
- **Renderer**: backend capability trait (resources, flush, lifecycle)

Backend implementations provide concrete types that implement these traits.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod renderer;

// Main av namespace module
pub mod av {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::{Engine, SharedRenderer};

    // Renderer trait
    pub use crate::renderer::Renderer;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are exported at the crate root
    }

    // Render sub-module with all rendering types
    pub mod render {
        pub use crate::renderer::*;
    }
}

// Re-export math library at crate root
pub use glam;
