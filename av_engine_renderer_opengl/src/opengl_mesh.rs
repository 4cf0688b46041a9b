/// GlMesh - vertex array and buffers of one mesh

use glow::{HasContext, NativeBuffer, NativeVertexArray};
use av_engine::av::render::VertexSpecification;
use av_engine::av::{Error, Result};
use av_engine::{engine_bail, engine_err};

use crate::opengl_format::{
    attribute_size, check_attribute_count, index_type_to_gl, vertex_attribute_format, AttributeKind,
};

/// OpenGL mesh state
#[derive(Debug, Clone, Copy)]
pub struct GlMesh {
    /// Vertex array object holding the attribute layout
    pub(crate) vao: NativeVertexArray,
    /// Interleaved vertex data
    pub(crate) vbo: NativeBuffer,
    /// Index data (indexed meshes only)
    pub(crate) ebo: Option<NativeBuffer>,
}

impl GlMesh {
    /// Upload mesh data and configure the vertex array
    ///
    /// The data must already be validated against `spec` (see `MeshInfo::new`).
    /// On failure every GL object created so far is deleted.
    ///
    /// # Safety
    ///
    /// `gl` must be the current context.
    pub(crate) unsafe fn create(
        gl: &glow::Context,
        vertex_data: &[u8],
        index_data: Option<&[u8]>,
        spec: &VertexSpecification,
    ) -> Result<Self> {
        // Check formats before creating anything
        check_attribute_count(spec.attributes().len())?;
        let mut formats = Vec::with_capacity(spec.attributes().len());
        for (location, offset, attribute) in spec.attribute_offsets() {
            let size = attribute_size(location, attribute.dimension())?;
            let (gl_type, kind) = vertex_attribute_format(attribute.data_type())?;
            formats.push((location, offset, size, gl_type, kind));
        }
        if index_data.is_some() {
            index_type_to_gl(spec.index_type())?;
        }
        let stride = i32::try_from(spec.packed_size()).map_err(|_| Error::InvalidResource(format!(
            "vertex stride {} exceeds the GL limit", spec.packed_size()
        )))?;

        let vao = gl.create_vertex_array()
            .map_err(|e| engine_err!("av::opengl", "Failed to create vertex array: {}", e))?;
        let vbo = match gl.create_buffer() {
            Ok(vbo) => vbo,
            Err(e) => {
                gl.delete_vertex_array(vao);
                engine_bail!("av::opengl", "Failed to create vertex buffer: {}", e);
            }
        };
        let ebo = match index_data {
            Some(_) => match gl.create_buffer() {
                Ok(ebo) => Some(ebo),
                Err(e) => {
                    gl.delete_buffer(vbo);
                    gl.delete_vertex_array(vao);
                    engine_bail!("av::opengl", "Failed to create index buffer: {}", e);
                }
            },
            None => None,
        };

        gl.bind_vertex_array(Some(vao));

        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, vertex_data, glow::STATIC_DRAW);

        if let (Some(ebo), Some(index_data)) = (ebo, index_data) {
            // Element buffer binding is captured by the VAO
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, index_data, glow::STATIC_DRAW);
        }

        for (location, offset, size, gl_type, kind) in formats {
            // Offsets are bounded by the stride checked above
            let offset = offset as i32;
            gl.enable_vertex_attrib_array(location);
            match kind {
                AttributeKind::Float => {
                    gl.vertex_attrib_pointer_f32(location, size, gl_type, false, stride, offset);
                }
                AttributeKind::Integer => {
                    gl.vertex_attrib_pointer_i32(location, size, gl_type, stride, offset);
                }
            }
        }

        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);

        Ok(Self { vao, vbo, ebo })
    }

    /// Delete the GL objects
    ///
    /// # Safety
    ///
    /// `gl` must be the current context, and the mesh must not be drawn again.
    pub(crate) unsafe fn destroy(self, gl: &glow::Context) {
        gl.delete_vertex_array(self.vao);
        gl.delete_buffer(self.vbo);
        if let Some(ebo) = self.ebo {
            gl.delete_buffer(ebo);
        }
    }
}
