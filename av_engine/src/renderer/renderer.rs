/// Renderer trait - backend capability set

use crate::error::{Error, Result};
use crate::renderer::{
    CommandBuffer, FlushStats, MeshHandle, MeshInfo, PrimitiveTopology, ShaderDesc,
    ShaderHandle, VertexSpecification,
};

/// Renderer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererConfig {
    /// Enable depth testing (clears then also clear depth)
    pub enable_depth_test: bool,
    /// Topology used for every mesh draw
    pub topology: PrimitiveTopology,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            enable_depth_test: false,
            topology: PrimitiveTopology::TriangleList,
        }
    }
}

/// Lifecycle of a renderer
///
/// `Created` → `initialize` → `Initialized` → `deinitialize` → `Deinitialized`.
/// There is no way back, a deinitialized renderer is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RendererState {
    #[default]
    Created,
    Initialized,
    Deinitialized,
}

impl RendererState {
    /// Fail unless the renderer is initialized
    pub fn ensure_ready(self, operation: &str) -> Result<()> {
        match self {
            RendererState::Initialized => Ok(()),
            RendererState::Created => Err(Error::InitializationFailed(format!(
                "{} called before initialize()", operation
            ))),
            RendererState::Deinitialized => Err(Error::InitializationFailed(format!(
                "{} called after deinitialize()", operation
            ))),
        }
    }

    /// Move from `Created` to `Initialized`
    pub fn begin(&mut self) -> Result<()> {
        if *self != RendererState::Created {
            return Err(Error::InitializationFailed(
                "renderer was already initialized".to_string()
            ));
        }
        *self = RendererState::Initialized;
        Ok(())
    }

    /// Move from `Initialized` to `Deinitialized`
    pub fn end(&mut self) -> Result<()> {
        self.ensure_ready("deinitialize")?;
        *self = RendererState::Deinitialized;
        Ok(())
    }
}

/// Main renderer trait
///
/// A renderer owns meshes and shaders and executes command buffers. Its
/// lifecycle is `initialize` once, any number of resource and flush calls,
/// then `deinitialize` once. Calls outside that window fail with
/// `Error::InitializationFailed`.
///
/// Handles are only meaningful to the renderer that issued them. A handle
/// whose resource was destroyed fails with `Error::InvalidResource`.
pub trait Renderer {
    /// Create an indexed mesh
    ///
    /// `vertex_data` is interleaved per `spec`; `index_data` holds indices of
    /// `spec.index_type()`.
    fn create_mesh_indexed(
        &mut self,
        vertex_data: &[u8],
        index_data: &[u8],
        spec: &VertexSpecification,
    ) -> Result<MeshHandle>;

    /// Create a non-indexed mesh
    fn create_mesh(&mut self, vertex_data: &[u8], spec: &VertexSpecification) -> Result<MeshHandle>;

    /// Compile and link a shader program
    ///
    /// # Errors
    ///
    /// `Error::ShaderCompilationFailed` with the backend's log on compile or
    /// link failure.
    fn create_shader(&mut self, desc: ShaderDesc<'_>) -> Result<ShaderHandle>;

    fn destroy_mesh(&mut self, mesh: MeshHandle) -> Result<()>;

    fn destroy_shader(&mut self, shader: ShaderHandle) -> Result<()>;

    /// Execute a finalized command buffer
    fn flush_command_buffer(&mut self, buffer: &CommandBuffer) -> Result<FlushStats>;

    /// Prepare the backend for use
    fn initialize(&mut self) -> Result<()>;

    /// Release every live mesh and shader and shut the backend down
    fn deinitialize(&mut self) -> Result<()>;

    /// Portable attributes of a live mesh
    fn mesh_info(&self, mesh: MeshHandle) -> Result<MeshInfo>;

    /// Counters of the last successful flush
    fn stats(&self) -> FlushStats;
}
