/// CommandBuffer - append-only recorder of renderer commands
///
/// Commands are encoded into a single byte vector as they are recorded. The
/// buffer is finalized with `end()` and then handed to
/// `Renderer::flush_command_buffer`, which decodes and executes it.

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::error::{Error, Result};
use crate::renderer::{ClearColor, Command, DataType, MeshHandle, ShaderHandle, UniformData};

/// Recorded, renderer-agnostic command stream
///
/// # Example
///
/// ```
/// use av_engine::av::render::CommandBuffer;
///
/// let mut cmd = CommandBuffer::new();
/// cmd.cmd_clear(0.0, 0.0, 0.0, 1.0)?;
/// cmd.cmd_uniform_f32("time", 0.5)?;
/// cmd.end()?;
///
/// assert_eq!(cmd.command_count(), 3);
/// assert!(cmd.is_finalized());
/// # Ok::<(), av_engine::av::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandBuffer {
    data: Vec<u8>,
    command_count: usize,
    finalized: bool,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            command_count: 0,
            finalized: false,
        }
    }

    fn record(&mut self, command: Command<'_>) -> Result<()> {
        if self.finalized {
            return Err(Error::EncodingError(format!(
                "cannot record {} into a finalized command buffer", command.command_type()
            )));
        }
        command.encode(&mut self.data)?;
        self.command_count += 1;
        crate::engine_trace!("av::CommandBuffer", "Recorded {} ({} bytes total)",
            command.command_type(), self.data.len());
        Ok(())
    }

    // ===== RECORDING =====

    /// Clear the color target (and depth, if enabled) to the given color
    pub fn cmd_clear(&mut self, r: f32, g: f32, b: f32, a: f32) -> Result<()> {
        self.record(Command::Clear(ClearColor::new(r, g, b, a)))
    }

    /// Make `shader` current for subsequent draws and uniform uploads
    pub fn cmd_bind_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        self.record(Command::BindShader(shader))
    }

    /// Draw a mesh with the currently bound shader
    pub fn cmd_draw_mesh(&mut self, mesh: MeshHandle) -> Result<()> {
        self.record(Command::DrawMesh(mesh))
    }

    /// Upload a uniform to the currently bound shader
    ///
    /// `data` is copied into the buffer. It must hold exactly
    /// `size_x * size_y` elements of `data_type`.
    ///
    /// # Errors
    ///
    /// `Error::EncodingError` if the name contains NUL or exceeds 254 bytes,
    /// if `data` exceeds 255 bytes, if a size is outside `1..=15`, if the
    /// data length disagrees with the shape, or if the buffer is finalized.
    /// Nothing is recorded on error.
    pub fn cmd_uniform(
        &mut self,
        name: &str,
        data: &[u8],
        data_type: DataType,
        size_x: u8,
        size_y: u8,
    ) -> Result<()> {
        self.record(Command::Uniform(UniformData { data_type, size_x, size_y, name, data }))
    }

    pub fn cmd_uniform_f32(&mut self, name: &str, value: f32) -> Result<()> {
        self.cmd_uniform(name, bytemuck::bytes_of(&value), DataType::Float32, 1, 1)
    }

    pub fn cmd_uniform_vec2(&mut self, name: &str, value: Vec2) -> Result<()> {
        self.cmd_uniform(name, bytemuck::cast_slice(&value.to_array()), DataType::Float32, 2, 1)
    }

    pub fn cmd_uniform_vec3(&mut self, name: &str, value: Vec3) -> Result<()> {
        self.cmd_uniform(name, bytemuck::cast_slice(&value.to_array()), DataType::Float32, 3, 1)
    }

    pub fn cmd_uniform_vec4(&mut self, name: &str, value: Vec4) -> Result<()> {
        self.cmd_uniform(name, bytemuck::cast_slice(&value.to_array()), DataType::Float32, 4, 1)
    }

    /// Upload a 3x3 matrix (column-major)
    pub fn cmd_uniform_mat3(&mut self, name: &str, value: Mat3) -> Result<()> {
        self.cmd_uniform(name, bytemuck::cast_slice(&value.to_cols_array()), DataType::Float32, 3, 3)
    }

    /// Upload a 4x4 matrix (column-major)
    pub fn cmd_uniform_mat4(&mut self, name: &str, value: Mat4) -> Result<()> {
        self.cmd_uniform(name, bytemuck::cast_slice(&value.to_cols_array()), DataType::Float32, 4, 4)
    }

    /// Append the End record and finalize the buffer
    ///
    /// # Errors
    ///
    /// `Error::EncodingError` if the buffer is already finalized.
    pub fn end(&mut self) -> Result<()> {
        self.record(Command::End)?;
        self.finalized = true;
        crate::engine_debug!("av::CommandBuffer", "Finalized {} commands in {} bytes",
            self.command_count, self.data.len());
        Ok(())
    }

    /// Drop every recorded command so the buffer can record the next frame
    ///
    /// Keeps the allocation.
    pub fn reset(&mut self) {
        self.data.clear();
        self.command_count = 0;
        self.finalized = false;
    }

    // ===== ACCESSORS =====

    /// Encoded bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Encoded size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of records, including End once finalized
    pub fn command_count(&self) -> usize {
        self.command_count
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "command_buffer_tests.rs"]
mod tests;
