/// Mesh resource types
///
/// A mesh is GPU-resident vertex (and optionally index) data. The portable
/// part (`MeshInfo`) is computed and validated here; backends pair it with
/// their own GPU objects in a `Mesh<B>`.

use crate::error::{Error, Result};
use crate::renderer::{DataType, VertexSpecification};

/// Primitive topology used when drawing meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// Triangle list
    #[default]
    TriangleList,
    /// Triangle strip
    TriangleStrip,
    /// Line list
    LineList,
    /// Point list
    PointList,
}

/// A single draw derived from a mesh
///
/// Indexed meshes always draw through their index buffer, non-indexed meshes
/// always draw their vertices in order. This is fixed at mesh creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// Draw `index_count` indices of `index_type`
    Indexed {
        topology: PrimitiveTopology,
        index_count: u32,
        index_type: DataType,
    },
    /// Draw `vertex_count` vertices starting at 0
    Arrays {
        topology: PrimitiveTopology,
        vertex_count: u32,
    },
}

/// Portable mesh attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshInfo {
    indexed: bool,
    vertex_count: u32,
    index_count: u32,
    vertex_spec: VertexSpecification,
}

impl MeshInfo {
    /// Validate mesh data against a vertex specification and derive counts
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if the stride is 0, if the vertex data is not
    /// a whole number of vertices, if the index type is not an integer type,
    /// or if the index data is not a whole number of indices.
    pub fn new(
        vertex_data: &[u8],
        index_data: Option<&[u8]>,
        spec: &VertexSpecification,
    ) -> Result<Self> {
        let stride = spec.packed_size();
        if stride == 0 {
            return Err(Error::InvalidResource(
                "Vertex specification has no attributes (stride is 0)".to_string()
            ));
        }

        if vertex_data.len() % stride != 0 {
            return Err(Error::InvalidResource(format!(
                "Vertex data size {} is not a multiple of stride {}",
                vertex_data.len(), stride
            )));
        }
        let vertex_count = Self::count(vertex_data.len() / stride, "vertex")?;

        let index_count = match index_data {
            Some(index_data) => {
                let index_type = spec.index_type();
                if !index_type.is_integer() {
                    return Err(Error::InvalidResource(format!(
                        "Index type {} is not an integer type", index_type
                    )));
                }
                let index_size = index_type.element_size();
                if index_data.len() % index_size != 0 {
                    return Err(Error::InvalidResource(format!(
                        "Index data size {} is not a multiple of index type size {}",
                        index_data.len(), index_size
                    )));
                }
                Self::count(index_data.len() / index_size, "index")?
            }
            None => 0,
        };

        Ok(Self {
            indexed: index_data.is_some(),
            vertex_count,
            index_count,
            vertex_spec: spec.clone(),
        })
    }

    fn count(count: usize, what: &str) -> Result<u32> {
        u32::try_from(count).map_err(|_| Error::InvalidResource(format!(
            "{} count {} does not fit in 32 bits", what, count
        )))
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Number of indices (0 if non-indexed)
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn vertex_spec(&self) -> &VertexSpecification {
        &self.vertex_spec
    }

    /// The draw this mesh issues
    pub fn draw_call(&self, topology: PrimitiveTopology) -> DrawCall {
        if self.indexed {
            DrawCall::Indexed {
                topology,
                index_count: self.index_count,
                index_type: self.vertex_spec.index_type(),
            }
        } else {
            DrawCall::Arrays {
                topology,
                vertex_count: self.vertex_count,
            }
        }
    }
}

/// A live mesh: portable info plus backend GPU state
pub struct Mesh<B> {
    info: MeshInfo,
    backend: B,
}

impl<B> Mesh<B> {
    pub fn new(info: MeshInfo, backend: B) -> Self {
        Self { info, backend }
    }

    pub fn info(&self) -> &MeshInfo {
        &self.info
    }

    /// Backend GPU state (buffers, vertex arrays, ...)
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Split into info and backend state, for destruction
    pub fn into_parts(self) -> (MeshInfo, B) {
        (self.info, self.backend)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
