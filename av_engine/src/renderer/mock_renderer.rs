/// Mock Renderer for unit tests (no GPU required)
///
/// Keeps real resource bookkeeping and runs the real dispatch loop, but its
/// executor only records what a GPU backend would have done. Recorded
/// actions live behind an `Arc` so tests can inspect them after the renderer
/// was handed to the `Engine`.

use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::renderer::{
    execute_command_buffer, ClearColor, CommandBuffer, CommandExecutor, DrawCall, FlushStats,
    Mesh, MeshHandle, MeshInfo, Renderer, RendererConfig, RendererState, ResourceStore, ShaderDesc,
    ShaderHandle, UniformValue, VertexSpecification,
};

// ============================================================================
// Mock resources
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockMesh {
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockShader {
    pub id: u32,
    pub vertex_source: String,
    pub fragment_source: String,
}

/// Something the mock backend was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum MockAction {
    Initialize,
    Deinitialize,
    Clear { color: ClearColor, depth: bool },
    Draw { mesh: u32, shader: u32, draw_call: DrawCall },
    SetUniform { shader: u32, name: String, value: UniformValue },
    DestroyMesh(u32),
    DestroyShader(u32),
}

pub type MockActionLog = Arc<Mutex<Vec<MockAction>>>;

fn push(log: &MockActionLog, action: MockAction) {
    if let Ok(mut actions) = log.lock() {
        actions.push(action);
    }
}

// ============================================================================
// Mock executor
// ============================================================================

pub struct MockExecutor {
    log: MockActionLog,
    depth_test: bool,
    /// Fail every draw with a backend error
    pub fail_draws: bool,
    /// Uniform names the mock programs do not declare
    pub missing_uniforms: Vec<String>,
}

impl CommandExecutor for MockExecutor {
    type MeshState = MockMesh;
    type ShaderState = MockShader;

    fn clear(&mut self, color: ClearColor) -> Result<()> {
        push(&self.log, MockAction::Clear { color, depth: self.depth_test });
        Ok(())
    }

    fn draw(&mut self, mesh: &Mesh<MockMesh>, shader: &MockShader, draw_call: DrawCall) -> Result<()> {
        if self.fail_draws {
            crate::engine_bail!("av::mock", "mock draw of mesh {} failed", mesh.backend().id);
        }
        push(&self.log, MockAction::Draw { mesh: mesh.backend().id, shader: shader.id, draw_call });
        Ok(())
    }

    fn set_uniform(&mut self, shader: &MockShader, name: &str, value: &UniformValue) -> Result<bool> {
        if self.missing_uniforms.iter().any(|missing| missing == name) {
            return Ok(false);
        }
        push(&self.log, MockAction::SetUniform {
            shader: shader.id,
            name: name.to_string(),
            value: *value,
        });
        Ok(true)
    }
}

// ============================================================================
// Mock renderer
// ============================================================================

pub struct MockRenderer {
    config: RendererConfig,
    state: RendererState,
    resources: ResourceStore<MockMesh, MockShader>,
    pub executor: MockExecutor,
    next_id: u32,
    stats: FlushStats,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::with_config(RendererConfig::default())
    }

    pub fn with_config(config: RendererConfig) -> Self {
        Self {
            config,
            state: RendererState::Created,
            resources: ResourceStore::new(),
            executor: MockExecutor {
                log: Arc::new(Mutex::new(Vec::new())),
                depth_test: config.enable_depth_test,
                fail_draws: false,
                missing_uniforms: Vec::new(),
            },
            next_id: 1,
            stats: FlushStats::default(),
        }
    }

    /// Created and initialized, ready for use
    pub fn initialized() -> Self {
        let mut renderer = Self::new();
        renderer.initialize().unwrap();
        renderer
    }

    /// Shared handle on the action log
    pub fn action_log(&self) -> MockActionLog {
        Arc::clone(&self.executor.log)
    }

    /// Snapshot of the recorded actions
    pub fn actions(&self) -> Vec<MockAction> {
        self.executor.log.lock().unwrap().clone()
    }

    pub fn clear_actions(&self) {
        self.executor.log.lock().unwrap().clear();
    }

    pub fn mesh_count(&self) -> usize {
        self.resources.mesh_count()
    }

    pub fn shader_count(&self) -> usize {
        self.resources.shader_count()
    }

    /// Backend id of a live mesh
    pub fn mesh_id(&self, mesh: MeshHandle) -> Result<u32> {
        Ok(self.resources.mesh(mesh)?.backend().id)
    }

    /// Backend id of a live shader
    pub fn shader_id(&self, shader: ShaderHandle) -> Result<u32> {
        Ok(self.resources.shader(shader)?.id)
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn insert_mesh(&mut self, info: MeshInfo) -> MeshHandle {
        let id = self.next_id();
        self.resources.insert_mesh(Mesh::new(info, MockMesh { id }))
    }
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for MockRenderer {
    fn create_mesh_indexed(
        &mut self,
        vertex_data: &[u8],
        index_data: &[u8],
        spec: &VertexSpecification,
    ) -> Result<MeshHandle> {
        self.state.ensure_ready("create_mesh_indexed")?;
        let info = MeshInfo::new(vertex_data, Some(index_data), spec)?;
        Ok(self.insert_mesh(info))
    }

    fn create_mesh(&mut self, vertex_data: &[u8], spec: &VertexSpecification) -> Result<MeshHandle> {
        self.state.ensure_ready("create_mesh")?;
        let info = MeshInfo::new(vertex_data, None, spec)?;
        Ok(self.insert_mesh(info))
    }

    /// Sources containing `#error` fail to "compile"
    fn create_shader(&mut self, desc: ShaderDesc<'_>) -> Result<ShaderHandle> {
        self.state.ensure_ready("create_shader")?;
        desc.validate()?;
        for (stage, source) in [("vertex", desc.vertex_source), ("fragment", desc.fragment_source)] {
            if source.contains("#error") {
                return Err(Error::ShaderCompilationFailed(format!(
                    "{} stage: 0:1: '#error' : mock compile error", stage
                )));
            }
        }
        let id = self.next_id();
        Ok(self.resources.insert_shader(MockShader {
            id,
            vertex_source: desc.vertex_source.to_string(),
            fragment_source: desc.fragment_source.to_string(),
        }))
    }

    fn destroy_mesh(&mut self, mesh: MeshHandle) -> Result<()> {
        self.state.ensure_ready("destroy_mesh")?;
        let (_, removed) = self.resources.remove_mesh(mesh)?.into_parts();
        push(&self.executor.log, MockAction::DestroyMesh(removed.id));
        Ok(())
    }

    fn destroy_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        self.state.ensure_ready("destroy_shader")?;
        let removed = self.resources.remove_shader(shader)?;
        push(&self.executor.log, MockAction::DestroyShader(removed.id));
        Ok(())
    }

    fn flush_command_buffer(&mut self, buffer: &CommandBuffer) -> Result<FlushStats> {
        self.state.ensure_ready("flush_command_buffer")?;
        let stats = execute_command_buffer(buffer, &self.resources, &mut self.executor, self.config.topology)?;
        self.stats = stats;
        Ok(stats)
    }

    fn initialize(&mut self) -> Result<()> {
        self.state.begin()?;
        push(&self.executor.log, MockAction::Initialize);
        Ok(())
    }

    fn deinitialize(&mut self) -> Result<()> {
        self.state.end()?;
        let (meshes, shaders) = self.resources.drain();
        for mesh in meshes {
            push(&self.executor.log, MockAction::DestroyMesh(mesh.backend().id));
        }
        for shader in shaders {
            push(&self.executor.log, MockAction::DestroyShader(shader.id));
        }
        push(&self.executor.log, MockAction::Deinitialize);
        Ok(())
    }

    fn mesh_info(&self, mesh: MeshHandle) -> Result<MeshInfo> {
        self.state.ensure_ready("mesh_info")?;
        Ok(self.resources.mesh(mesh)?.info().clone())
    }

    fn stats(&self) -> FlushStats {
        self.stats
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_renderer_tests.rs"]
mod tests;
