/// Typed uniform values decoded from uniform records

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::error::{Error, Result};
use crate::renderer::{DataType, UniformData};

/// A uniform value a backend can upload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl UniformValue {
    /// GLSL-style type name
    pub fn type_name(&self) -> &'static str {
        match self {
            UniformValue::Float(_) => "float",
            UniformValue::Vec2(_) => "vec2",
            UniformValue::Vec3(_) => "vec3",
            UniformValue::Vec4(_) => "vec4",
            UniformValue::Mat3(_) => "mat3",
            UniformValue::Mat4(_) => "mat4",
        }
    }
}

impl<'a> TryFrom<&UniformData<'a>> for UniformValue {
    type Error = Error;

    /// Map a record's shape to a value
    ///
    /// Only `Float32` records are supported. The shape must be a vector
    /// (`size_y == 1`) or square (`size_x == size_y`), and the element count
    /// picks the value: 1 float, 2 vec2, 3 vec3, 4 vec4, 9 mat3, 16 mat4.
    /// A 2x2 record therefore uploads as a vec4.
    fn try_from(uniform: &UniformData<'a>) -> Result<Self> {
        if uniform.data_type != DataType::Float32 {
            return Err(Error::UnsupportedUniform(format!(
                "uniform '{}' has element type {}, only Float32 is supported",
                uniform.name, uniform.data_type
            )));
        }
        if uniform.size_y != 1 && uniform.size_x != uniform.size_y {
            return Err(Error::UnsupportedUniform(format!(
                "uniform '{}' has non-square shape {}x{}",
                uniform.name, uniform.size_x, uniform.size_y
            )));
        }

        let count = uniform.element_count();
        if uniform.data.len() != count * DataType::Float32.element_size() {
            return Err(Error::UnsupportedUniform(format!(
                "uniform '{}' declares {} floats but carries {} bytes",
                uniform.name, count, uniform.data.len()
            )));
        }

        let data = uniform.data;
        let value = match count {
            1 => UniformValue::Float(bytemuck::pod_read_unaligned::<f32>(data)),
            2 => UniformValue::Vec2(Vec2::from_array(bytemuck::pod_read_unaligned(data))),
            3 => UniformValue::Vec3(Vec3::from_array(bytemuck::pod_read_unaligned(data))),
            4 => UniformValue::Vec4(Vec4::from_array(bytemuck::pod_read_unaligned(data))),
            9 => UniformValue::Mat3(Mat3::from_cols_array(&bytemuck::pod_read_unaligned(data))),
            16 => UniformValue::Mat4(Mat4::from_cols_array(&bytemuck::pod_read_unaligned(data))),
            other => {
                return Err(Error::UnsupportedUniform(format!(
                    "uniform '{}' has {} elements ({}x{}), no matching type",
                    uniform.name, other, uniform.size_x, uniform.size_y
                )));
            }
        };
        Ok(value)
    }
}
