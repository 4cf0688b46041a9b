/// Renderer module - command buffers, resource types and the renderer trait

// Module declarations
pub mod data_type;
pub mod vertex_specification;
pub mod mesh;
pub mod shader;
pub mod resource_store;
pub mod command;
pub mod command_buffer;
pub mod command_buffer_reader;
pub mod uniform;
pub mod dispatch;
pub mod renderer;

#[cfg(test)]
pub mod mock_renderer;

// Re-export everything
pub use data_type::*;
pub use vertex_specification::*;
pub use mesh::*;
pub use shader::*;
pub use resource_store::*;
pub use command::*;
pub use command_buffer::*;
pub use command_buffer_reader::*;
pub use uniform::*;
pub use dispatch::*;
pub use renderer::*;
