/// Shader descriptor

use crate::error::{Error, Result};

/// Descriptor for creating a shader program
///
/// Both sources are complete source text in the shading language the backend
/// expects (GLSL for the OpenGL backend).
#[derive(Debug, Clone, Copy)]
pub struct ShaderDesc<'a> {
    /// Vertex stage source
    pub vertex_source: &'a str,
    /// Fragment stage source
    pub fragment_source: &'a str,
}

impl<'a> ShaderDesc<'a> {
    pub fn new(vertex_source: &'a str, fragment_source: &'a str) -> Self {
        Self { vertex_source, fragment_source }
    }

    /// Reject empty sources and sources with embedded NUL bytes
    pub fn validate(&self) -> Result<()> {
        for (stage, source) in [("vertex", self.vertex_source), ("fragment", self.fragment_source)] {
            if source.trim().is_empty() {
                return Err(Error::InvalidResource(format!("{} shader source is empty", stage)));
            }
            if source.contains('\0') {
                return Err(Error::InvalidResource(format!(
                    "{} shader source contains a NUL byte", stage
                )));
            }
        }
        Ok(())
    }
}
