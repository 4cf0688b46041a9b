/// Dispatch loop - executes a recorded command buffer against a backend
///
/// Backends implement `CommandExecutor` for the GPU work and keep their
/// resources in a `ResourceStore`. `execute_command_buffer` decodes the
/// buffer, resolves handles, tracks the bound shader between records and
/// forwards each action to the executor.

use crate::error::{Error, Result};
use crate::renderer::{
    ClearColor, Command, CommandBuffer, CommandBufferReader, DrawCall, Mesh,
    PrimitiveTopology, ResourceStore, ShaderHandle, UniformValue,
};

/// GPU actions a backend performs while a command buffer is flushed
pub trait CommandExecutor {
    /// Backend state stored in each `Mesh`
    type MeshState;
    /// Backend state of a shader program
    type ShaderState;

    fn clear(&mut self, color: ClearColor) -> Result<()>;

    fn draw(
        &mut self,
        mesh: &Mesh<Self::MeshState>,
        shader: &Self::ShaderState,
        draw_call: DrawCall,
    ) -> Result<()>;

    /// Upload a uniform to `shader`
    ///
    /// Returns `false` when the program has no uniform called `name` and
    /// nothing was uploaded.
    fn set_uniform(
        &mut self,
        shader: &Self::ShaderState,
        name: &str,
        value: &UniformValue,
    ) -> Result<bool>;
}

/// Counters of the work done by one flush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushStats {
    /// Records executed, End included
    pub commands: usize,
    pub clears: usize,
    pub shader_binds: usize,
    pub draw_calls: usize,
    /// Uniforms the executor actually uploaded
    pub uniform_uploads: usize,
    /// Uniforms skipped because the bound program does not declare them
    pub uniforms_skipped: usize,
}

/// Execute every record of a finalized command buffer
///
/// Records are executed in order until `End`. The first error aborts the
/// flush; actions already issued stay issued.
///
/// # Errors
///
/// - `Error::DecodingError` if the buffer is not finalized or malformed
/// - `Error::InvalidResource` for handles of destroyed resources
/// - `Error::NoShaderBound` for a draw or uniform before any BindShader
/// - `Error::UnsupportedUniform` for uniform shapes without a value type
/// - any error returned by the executor
pub fn execute_command_buffer<E: CommandExecutor>(
    buffer: &CommandBuffer,
    resources: &ResourceStore<E::MeshState, E::ShaderState>,
    executor: &mut E,
    topology: PrimitiveTopology,
) -> Result<FlushStats> {
    run(buffer, resources, executor, topology)
        .map_err(|error| error.logged("av::dispatch"))
}

fn run<E: CommandExecutor>(
    buffer: &CommandBuffer,
    resources: &ResourceStore<E::MeshState, E::ShaderState>,
    executor: &mut E,
    topology: PrimitiveTopology,
) -> Result<FlushStats> {
    if !buffer.is_finalized() {
        return Err(Error::DecodingError(
            "command buffer must be finalized with end() before it is flushed".to_string()
        ));
    }

    let mut reader = CommandBufferReader::new(buffer.data());
    let mut stats = FlushStats::default();
    let mut bound: Option<(ShaderHandle, &E::ShaderState)> = None;

    loop {
        let command = reader.next_command()?;
        stats.commands += 1;

        match command {
            Command::End => break,
            Command::Clear(color) => {
                executor.clear(color)?;
                stats.clears += 1;
            }
            Command::BindShader(handle) => {
                bound = Some((handle, resources.shader(handle)?));
                stats.shader_binds += 1;
            }
            Command::DrawMesh(handle) => {
                let mesh = resources.mesh(handle)?;
                let (_, shader) = bound.ok_or_else(|| Error::NoShaderBound(format!(
                    "draw of mesh {:?} at offset {}", handle, reader.position()
                )))?;
                executor.draw(mesh, shader, mesh.info().draw_call(topology))?;
                stats.draw_calls += 1;
            }
            Command::Uniform(uniform) => {
                let (_, shader) = bound.ok_or_else(|| Error::NoShaderBound(format!(
                    "upload of uniform '{}'", uniform.name
                )))?;
                let value = UniformValue::try_from(&uniform)?;
                if executor.set_uniform(shader, uniform.name, &value)? {
                    stats.uniform_uploads += 1;
                } else {
                    stats.uniforms_skipped += 1;
                }
            }
        }
    }

    if let Some((handle, _)) = bound {
        crate::engine_trace!("av::dispatch", "Flush ended with shader {:?} bound", handle);
    }
    crate::engine_debug!("av::dispatch", "Flushed {} commands ({} draws, {} uniforms, {} skipped)",
        stats.commands, stats.draw_calls, stats.uniform_uploads, stats.uniforms_skipped);
    Ok(stats)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
