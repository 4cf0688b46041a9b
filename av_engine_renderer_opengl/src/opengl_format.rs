/// Conversions from engine types to OpenGL enums

use av_engine::av::render::{DataType, PrimitiveTopology};
use av_engine::av::{Error, Result};

/// How a vertex attribute reaches the shader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttributeKind {
    /// `glVertexAttribPointer`, values arrive as floats
    Float,
    /// `glVertexAttribIPointer`, values arrive as integers
    Integer,
}

/// GL component type and upload path of a vertex attribute type
pub(crate) fn vertex_attribute_format(data_type: DataType) -> Result<(u32, AttributeKind)> {
    let format = match data_type {
        DataType::Float32 => (glow::FLOAT, AttributeKind::Float),
        DataType::Float64 => (glow::DOUBLE, AttributeKind::Float),
        DataType::Int8 => (glow::BYTE, AttributeKind::Integer),
        DataType::Int16 => (glow::SHORT, AttributeKind::Integer),
        DataType::Int32 => (glow::INT, AttributeKind::Integer),
        DataType::UInt8 => (glow::UNSIGNED_BYTE, AttributeKind::Integer),
        DataType::UInt16 => (glow::UNSIGNED_SHORT, AttributeKind::Integer),
        DataType::UInt32 => (glow::UNSIGNED_INT, AttributeKind::Integer),
        DataType::Int64 | DataType::UInt64 | DataType::Sampler2D | DataType::SamplerCube => {
            return Err(Error::InvalidResource(format!(
                "{} cannot be used as a vertex attribute type", data_type
            )));
        }
    };
    Ok(format)
}

/// Attribute slots every GL 3.3 implementation provides (`GL_MAX_VERTEX_ATTRIBS`)
pub(crate) const MAX_VERTEX_ATTRIBUTES: usize = 16;

/// Component count accepted by `glVertexAttribPointer`
pub(crate) fn attribute_size(location: u32, dimension: u32) -> Result<i32> {
    match dimension {
        1..=4 => Ok(dimension as i32),
        _ => Err(Error::InvalidResource(format!(
            "vertex attribute {} has {} components, expected 1 to 4", location, dimension
        ))),
    }
}

/// Reject layouts with more attributes than GL guarantees
pub(crate) fn check_attribute_count(count: usize) -> Result<()> {
    if count > MAX_VERTEX_ATTRIBUTES {
        return Err(Error::InvalidResource(format!(
            "vertex specification has {} attributes, at most {} are supported",
            count, MAX_VERTEX_ATTRIBUTES
        )));
    }
    Ok(())
}

/// GL index type for indexed draws
pub(crate) fn index_type_to_gl(data_type: DataType) -> Result<u32> {
    match data_type {
        DataType::UInt8 => Ok(glow::UNSIGNED_BYTE),
        DataType::UInt16 => Ok(glow::UNSIGNED_SHORT),
        DataType::UInt32 => Ok(glow::UNSIGNED_INT),
        other => Err(Error::InvalidResource(format!(
            "{} cannot be used as an index type, expected UInt8, UInt16 or UInt32", other
        ))),
    }
}

/// Element or vertex count as the `GLsizei` draw calls take
pub(crate) fn draw_count(count: u32) -> Result<i32> {
    i32::try_from(count).map_err(|_| Error::BackendError(format!(
        "draw of {} elements exceeds the GL count limit of {}", count, i32::MAX
    )))
}

/// GL draw mode
pub(crate) fn topology_to_gl(topology: PrimitiveTopology) -> u32 {
    match topology {
        PrimitiveTopology::TriangleList => glow::TRIANGLES,
        PrimitiveTopology::TriangleStrip => glow::TRIANGLE_STRIP,
        PrimitiveTopology::LineList => glow::LINES,
        PrimitiveTopology::PointList => glow::POINTS,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "opengl_format_tests.rs"]
mod tests;
