/// GlRenderer - OpenGL implementation of the Renderer trait

use glow::HasContext;
use av_engine::av::render::{
    execute_command_buffer, CommandBuffer, FlushStats, Mesh, MeshHandle, MeshInfo,
    RendererConfig, RendererState, ResourceStore, ShaderDesc, ShaderHandle, VertexSpecification,
};
use av_engine::av::{Renderer, Result};
use av_engine::{engine_debug, engine_info, engine_warn};

use crate::opengl_executor::GlExecutor;
use crate::opengl_mesh::GlMesh;
use crate::opengl_shader::GlShader;

/// OpenGL 3.3 core renderer over a caller-supplied context
///
/// The caller creates the window and context, makes the context current and
/// loads the GL functions into a `glow::Context`. Every method must then be
/// called with that context current on the calling thread.
///
/// # Example
///
/// ```ignore
/// use av_engine::av::Renderer;
/// use av_engine::av::render::{CommandBuffer, RendererConfig};
/// use av_engine_renderer_opengl::GlRenderer;
///
/// let gl = unsafe { glow::Context::from_loader_function(|s| loader(s)) };
/// let mut renderer = GlRenderer::new(gl, RendererConfig::default());
/// renderer.initialize()?;
///
/// let mut cmd = CommandBuffer::new();
/// cmd.cmd_clear(0.1, 0.1, 0.1, 1.0)?;
/// cmd.end()?;
/// renderer.flush_command_buffer(&cmd)?;
/// ```
pub struct GlRenderer {
    config: RendererConfig,
    state: RendererState,
    resources: ResourceStore<GlMesh, GlShader>,
    executor: GlExecutor,
    stats: FlushStats,
}

impl GlRenderer {
    pub fn new(gl: glow::Context, config: RendererConfig) -> Self {
        Self {
            config,
            state: RendererState::Created,
            resources: ResourceStore::new(),
            executor: GlExecutor::new(gl, config.enable_depth_test),
            stats: FlushStats::default(),
        }
    }

    /// The wrapped context
    pub fn gl(&self) -> &glow::Context {
        &self.executor.gl
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn mesh_count(&self) -> usize {
        self.resources.mesh_count()
    }

    pub fn shader_count(&self) -> usize {
        self.resources.shader_count()
    }

    fn create_mesh_internal(
        &mut self,
        vertex_data: &[u8],
        index_data: Option<&[u8]>,
        spec: &VertexSpecification,
    ) -> Result<MeshHandle> {
        self.state.ensure_ready("create_mesh")?;
        let info = MeshInfo::new(vertex_data, index_data, spec)?;
        let gl_mesh = unsafe { GlMesh::create(&self.executor.gl, vertex_data, index_data, spec)? };

        engine_debug!("av::opengl", "Created mesh: {} vertices, {} indices",
            info.vertex_count(), info.index_count());
        Ok(self.resources.insert_mesh(Mesh::new(info, gl_mesh)))
    }

    /// Delete every live GL object
    fn release_all(&mut self) {
        let (meshes, shaders) = self.resources.drain();
        let (mesh_count, shader_count) = (meshes.len(), shaders.len());
        unsafe {
            for mesh in meshes {
                let (_, gl_mesh) = mesh.into_parts();
                gl_mesh.destroy(&self.executor.gl);
            }
            for shader in shaders {
                shader.destroy(&self.executor.gl);
            }
        }
        self.executor.forget_all_programs();
        engine_debug!("av::opengl", "Released {} meshes and {} shaders", mesh_count, shader_count);
    }
}

impl Renderer for GlRenderer {
    fn create_mesh_indexed(
        &mut self,
        vertex_data: &[u8],
        index_data: &[u8],
        spec: &VertexSpecification,
    ) -> Result<MeshHandle> {
        self.create_mesh_internal(vertex_data, Some(index_data), spec)
    }

    fn create_mesh(&mut self, vertex_data: &[u8], spec: &VertexSpecification) -> Result<MeshHandle> {
        self.create_mesh_internal(vertex_data, None, spec)
    }

    fn create_shader(&mut self, desc: ShaderDesc<'_>) -> Result<ShaderHandle> {
        self.state.ensure_ready("create_shader")?;
        desc.validate()?;
        let shader = unsafe { GlShader::create(&self.executor.gl, &desc)? };
        Ok(self.resources.insert_shader(shader))
    }

    fn destroy_mesh(&mut self, mesh: MeshHandle) -> Result<()> {
        self.state.ensure_ready("destroy_mesh")?;
        let (_, gl_mesh) = self.resources.remove_mesh(mesh)?.into_parts();
        unsafe { gl_mesh.destroy(&self.executor.gl) };
        Ok(())
    }

    fn destroy_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        self.state.ensure_ready("destroy_shader")?;
        let gl_shader = self.resources.remove_shader(shader)?;
        self.executor.forget_program(&gl_shader);
        unsafe { gl_shader.destroy(&self.executor.gl) };
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
        unsafe {
            let gl = &self.executor.gl;
            if self.config.enable_depth_test {
                gl.enable(glow::DEPTH_TEST);
            } else {
                gl.disable(glow::DEPTH_TEST);
            }
            engine_info!("av::opengl", "OpenGL renderer initialized ({}, {})",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER));
        }
        Ok(())
    }

    fn deinitialize(&mut self) -> Result<()> {
        self.state.end()?;
        self.release_all();
        engine_info!("av::opengl", "OpenGL renderer deinitialized");
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

impl Drop for GlRenderer {
    fn drop(&mut self) {
        if self.state == RendererState::Initialized {
            engine_warn!("av::opengl", "GlRenderer dropped without deinitialize(), releasing GL objects");
            self.release_all();
        }
    }
}
