/// GlShader - linked vertex + fragment program

use glow::{HasContext, NativeProgram, NativeShader};
use av_engine::av::render::ShaderDesc;
use av_engine::av::{Error, Result};
use av_engine::{engine_debug, engine_err};

/// OpenGL shader state
#[derive(Debug, Clone, Copy)]
pub struct GlShader {
    pub(crate) program: NativeProgram,
}

impl GlShader {
    /// Compile both stages and link them into a program
    ///
    /// Stage objects are deleted once linked. Compile and link failures
    /// return `Error::ShaderCompilationFailed` carrying the GL info log.
    ///
    /// # Safety
    ///
    /// `gl` must be the current context.
    pub(crate) unsafe fn create(gl: &glow::Context, desc: &ShaderDesc<'_>) -> Result<Self> {
        let vertex = compile_stage(gl, glow::VERTEX_SHADER, "vertex", desc.vertex_source)?;
        let fragment = match compile_stage(gl, glow::FRAGMENT_SHADER, "fragment", desc.fragment_source) {
            Ok(fragment) => fragment,
            Err(e) => {
                gl.delete_shader(vertex);
                return Err(e);
            }
        };

        let result = link_program(gl, vertex, fragment);

        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        let program = result?;
        engine_debug!("av::opengl", "Linked shader program {}", program.0);
        Ok(Self { program })
    }

    /// Delete the program
    ///
    /// # Safety
    ///
    /// `gl` must be the current context.
    pub(crate) unsafe fn destroy(self, gl: &glow::Context) {
        gl.delete_program(self.program);
    }

    /// Key identifying this program in per-program caches
    pub(crate) fn id(&self) -> u32 {
        self.program.0.get()
    }
}

unsafe fn compile_stage(
    gl: &glow::Context,
    stage: u32,
    stage_name: &str,
    source: &str,
) -> Result<NativeShader> {
    let shader = gl.create_shader(stage)
        .map_err(|e| engine_err!("av::opengl", "Failed to create {} shader: {}", stage_name, e))?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(Error::ShaderCompilationFailed(format!(
            "{} shader failed to compile:\n{}", stage_name, log.trim_end()
        )).logged("av::opengl"));
    }
    Ok(shader)
}

unsafe fn link_program(
    gl: &glow::Context,
    vertex: NativeShader,
    fragment: NativeShader,
) -> Result<NativeProgram> {
    let program = gl.create_program()
        .map_err(|e| engine_err!("av::opengl", "Failed to create shader program: {}", e))?;

    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);
    gl.detach_shader(program, vertex);
    gl.detach_shader(program, fragment);

    if !gl.get_program_link_status(program) {
        let log = gl.get_program_info_log(program);
        gl.delete_program(program);
        return Err(Error::ShaderCompilationFailed(format!(
            "shader program failed to link:\n{}", log.trim_end()
        )).logged("av::opengl"));
    }
    Ok(program)
}
