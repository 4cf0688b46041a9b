/*!
# AV Engine - OpenGL Renderer Backend

OpenGL 3.3 core implementation of the AV engine renderer.

This crate implements the `av_engine` `Renderer` and `CommandExecutor` traits
on top of a [`glow`] context supplied by the application. Window and context
creation, and loading the GL function pointers, stay with the caller.
*/

// OpenGL implementation modules
mod opengl_format;
mod opengl_mesh;
mod opengl_shader;
mod opengl_executor;
mod opengl_renderer;

pub use opengl_renderer::GlRenderer;
pub use opengl_executor::GlExecutor;
pub use opengl_mesh::GlMesh;
pub use opengl_shader::GlShader;
