/// DataType - element kinds for vertex attributes, indices and uniforms

use std::fmt;
use crate::error::{Error, Result};

/// Element kind of vertex, index or uniform data
///
/// The discriminant is the byte written into uniform records of a command
/// buffer, so the values are part of the binary format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataType {
    /// 32-bit float
    Float32 = 0x00,
    /// 64-bit float
    Float64 = 0x01,
    /// Signed 8-bit integer
    Int8 = 0x02,
    /// Signed 16-bit integer
    Int16 = 0x03,
    /// Signed 32-bit integer
    Int32 = 0x04,
    /// Signed 64-bit integer
    Int64 = 0x05,
    /// Unsigned 8-bit integer
    UInt8 = 0x06,
    /// Unsigned 16-bit integer
    UInt16 = 0x07,
    /// Unsigned 32-bit integer
    UInt32 = 0x08,
    /// Unsigned 64-bit integer
    UInt64 = 0x09,
    /// 2D texture sampler (uniforms only)
    Sampler2D = 0x0A,
    /// Cube map sampler (uniforms only)
    SamplerCube = 0x0B,
}

impl DataType {
    /// Size in bytes of one element
    pub fn element_size(self) -> usize {
        match self {
            DataType::Float32 => 4,
            DataType::Float64 => 8,
            DataType::Int8 => 1,
            DataType::Int16 => 2,
            DataType::Int32 => 4,
            DataType::Int64 => 8,
            DataType::UInt8 => 1,
            DataType::UInt16 => 2,
            DataType::UInt32 => 4,
            DataType::UInt64 => 8,
            DataType::Sampler2D => 4,
            DataType::SamplerCube => 4,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            DataType::Float32 => "Float32",
            DataType::Float64 => "Float64",
            DataType::Int8 => "Int8",
            DataType::Int16 => "Int16",
            DataType::Int32 => "Int32",
            DataType::Int64 => "Int64",
            DataType::UInt8 => "UInt8",
            DataType::UInt16 => "UInt16",
            DataType::UInt32 => "UInt32",
            DataType::UInt64 => "UInt64",
            DataType::Sampler2D => "Sampler2D",
            DataType::SamplerCube => "SamplerCube",
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64)
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64
                | DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64
        )
    }

    pub fn is_sampler(self) -> bool {
        matches!(self, DataType::Sampler2D | DataType::SamplerCube)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for DataType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        let data_type = match value {
            0x00 => DataType::Float32,
            0x01 => DataType::Float64,
            0x02 => DataType::Int8,
            0x03 => DataType::Int16,
            0x04 => DataType::Int32,
            0x05 => DataType::Int64,
            0x06 => DataType::UInt8,
            0x07 => DataType::UInt16,
            0x08 => DataType::UInt32,
            0x09 => DataType::UInt64,
            0x0A => DataType::Sampler2D,
            0x0B => DataType::SamplerCube,
            other => {
                return Err(Error::DecodingError(format!("unknown data type byte 0x{:02X}", other)));
            }
        };
        Ok(data_type)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "data_type_tests.rs"]
mod tests;
