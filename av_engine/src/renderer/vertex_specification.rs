/// Vertex layout description shared by every backend

use crate::renderer::DataType;

/// One component of a vertex record (e.g. a 3-component float position)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    data_type: DataType,
    dimension: u32,
}

impl VertexAttribute {
    /// Create an attribute of `dimension` elements of `data_type`
    pub fn new(data_type: DataType, dimension: u32) -> Self {
        Self { data_type, dimension }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Component count
    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Size in bytes of one element
    pub fn element_size(&self) -> usize {
        self.data_type.element_size()
    }

    /// Size in bytes of the whole attribute (element size × dimension)
    pub fn packed_size(&self) -> usize {
        self.element_size() * self.dimension as usize
    }
}

/// Ordered vertex attributes plus the index element type
///
/// Attribute order is memory layout order: the attributes are tightly packed
/// one after another, and the sum of their packed sizes is the vertex stride.
/// The index type is only used by indexed meshes.
///
/// # Example
///
/// ```
/// use av_engine::av::render::{DataType, VertexSpecification};
///
/// let spec = VertexSpecification::new(DataType::UInt16)
///     .with_attribute(DataType::Float32, 3) // position
///     .with_attribute(DataType::Float32, 3) // normal
///     .with_attribute(DataType::Float32, 2); // uv
/// assert_eq!(spec.packed_size(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexSpecification {
    attributes: Vec<VertexAttribute>,
    index_type: DataType,
}

impl VertexSpecification {
    /// Create an empty specification with the given index type
    pub fn new(index_type: DataType) -> Self {
        Self {
            attributes: Vec::new(),
            index_type,
        }
    }

    /// Create a specification from an attribute list
    pub fn from_attributes(attributes: Vec<VertexAttribute>, index_type: DataType) -> Self {
        Self { attributes, index_type }
    }

    /// Append an attribute (builder style)
    pub fn with_attribute(mut self, data_type: DataType, dimension: u32) -> Self {
        self.attributes.push(VertexAttribute::new(data_type, dimension));
        self
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn index_type(&self) -> DataType {
        self.index_type
    }

    /// Per-vertex stride in bytes
    pub fn packed_size(&self) -> usize {
        self.attributes.iter().map(VertexAttribute::packed_size).sum()
    }

    /// Iterate `(location, byte offset, attribute)` in layout order
    pub fn attribute_offsets(&self) -> impl Iterator<Item = (u32, usize, &VertexAttribute)> + '_ {
        self.attributes
            .iter()
            .scan(0usize, |offset, attribute| {
                let start = *offset;
                *offset += attribute.packed_size();
                Some((start, attribute))
            })
            .enumerate()
            .map(|(location, (offset, attribute))| (location as u32, offset, attribute))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "vertex_specification_tests.rs"]
mod tests;
