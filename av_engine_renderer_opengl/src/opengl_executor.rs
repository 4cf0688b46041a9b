/// GlExecutor - OpenGL implementation of CommandExecutor

use glow::{HasContext, NativeUniformLocation};
use rustc_hash::FxHashMap;
use av_engine::av::render::{ClearColor, CommandExecutor, DrawCall, Mesh, UniformValue};
use av_engine::av::Result;
use av_engine::{engine_trace, engine_warn};

use crate::opengl_format::{draw_count, index_type_to_gl, topology_to_gl};
use crate::opengl_mesh::GlMesh;
use crate::opengl_shader::GlShader;

/// Issues GL calls for decoded commands
///
/// Owns the context so the renderer's resource store can be borrowed
/// alongside it during a flush.
pub struct GlExecutor {
    pub(crate) gl: glow::Context,
    depth_test: bool,
    /// Uniform locations per program id; `None` records a name the program
    /// does not have
    uniform_locations: FxHashMap<u32, FxHashMap<String, Option<NativeUniformLocation>>>,
}

impl GlExecutor {
    pub(crate) fn new(gl: glow::Context, depth_test: bool) -> Self {
        Self {
            gl,
            depth_test,
            uniform_locations: FxHashMap::default(),
        }
    }

    /// Drop cached locations of a program that is being deleted
    pub(crate) fn forget_program(&mut self, shader: &GlShader) {
        self.uniform_locations.remove(&shader.id());
    }

    pub(crate) fn forget_all_programs(&mut self) {
        self.uniform_locations.clear();
    }

    fn uniform_location(&mut self, shader: &GlShader, name: &str) -> Option<NativeUniformLocation> {
        let locations = self.uniform_locations.entry(shader.id()).or_default();
        if let Some(location) = locations.get(name) {
            return location.clone();
        }

        let location = unsafe { self.gl.get_uniform_location(shader.program, name) };
        if location.is_none() {
            engine_warn!("av::opengl", "Uniform '{}' not found in program {}, uploads are skipped",
                name, shader.id());
        }
        locations.insert(name.to_string(), location.clone());
        location
    }
}

impl CommandExecutor for GlExecutor {
    type MeshState = GlMesh;
    type ShaderState = GlShader;

    fn clear(&mut self, color: ClearColor) -> Result<()> {
        let mut mask = glow::COLOR_BUFFER_BIT;
        if self.depth_test {
            mask |= glow::DEPTH_BUFFER_BIT;
        }
        unsafe {
            self.gl.clear_color(color.r, color.g, color.b, color.a);
            self.gl.clear(mask);
        }
        Ok(())
    }

    fn draw(&mut self, mesh: &Mesh<GlMesh>, shader: &GlShader, draw_call: DrawCall) -> Result<()> {
        let state = mesh.backend();
        // Resolve everything fallible before touching GL state
        let (mode, count, index_type) = match draw_call {
            DrawCall::Indexed { topology, index_count, index_type } => {
                (topology_to_gl(topology), draw_count(index_count)?, Some(index_type_to_gl(index_type)?))
            }
            DrawCall::Arrays { topology, vertex_count } => {
                (topology_to_gl(topology), draw_count(vertex_count)?, None)
            }
        };
        unsafe {
            self.gl.use_program(Some(shader.program));
            self.gl.bind_vertex_array(Some(state.vao));
            match index_type {
                Some(gl_index_type) => self.gl.draw_elements(mode, count, gl_index_type, 0),
                None => self.gl.draw_arrays(mode, 0, count),
            }
            self.gl.bind_vertex_array(None);
        }
        engine_trace!("av::opengl", "Drew {:?} with program {}", draw_call, shader.id());
        Ok(())
    }

    fn set_uniform(&mut self, shader: &GlShader, name: &str, value: &UniformValue) -> Result<bool> {
        let Some(location) = self.uniform_location(shader, name) else {
            return Ok(false);
        };
        let location = Some(&location);
        unsafe {
            self.gl.use_program(Some(shader.program));
            match value {
                UniformValue::Float(v) => self.gl.uniform_1_f32(location, *v),
                UniformValue::Vec2(v) => self.gl.uniform_2_f32(location, v.x, v.y),
                UniformValue::Vec3(v) => self.gl.uniform_3_f32(location, v.x, v.y, v.z),
                UniformValue::Vec4(v) => self.gl.uniform_4_f32(location, v.x, v.y, v.z, v.w),
                UniformValue::Mat3(m) => {
                    self.gl.uniform_matrix_3_f32_slice(location, false, &m.to_cols_array());
                }
                UniformValue::Mat4(m) => {
                    self.gl.uniform_matrix_4_f32_slice(location, false, &m.to_cols_array());
                }
            }
        }
        Ok(true)
    }
}
