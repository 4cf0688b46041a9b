/// Command records - the binary layout shared by writer and reader
///
/// Every record is one tag byte followed by a payload whose shape depends on
/// the tag. All multi-byte scalars are native endian, so a buffer is only
/// meaningful on the machine that recorded it.
///
/// ```text
/// Clear       0x03 | r:f32 g:f32 b:f32 a:f32
/// BindShader  0x01 | handle:u64
/// DrawMesh    0x00 | handle:u64
/// Uniform     0x02 | type:u8 | sizes:u8 (x low nibble, y high nibble)
///                  | N:u8 | name[N] (NUL terminated) | M:u8 | data[M]
/// End         0xFF
/// ```

use std::fmt;
use crate::error::{Error, Result};
use crate::renderer::{DataType, MeshHandle, ShaderHandle, WireHandle};

/// Largest value a u8 length prefix can carry
pub const MAX_PREFIXED_LEN: usize = u8::MAX as usize;

/// Largest uniform dimension (stored in a 4-bit nibble)
pub const MAX_UNIFORM_SIZE: u8 = 0x0F;

// ============================================================================
// CommandType
// ============================================================================

/// Tag byte opening every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandType {
    DrawMesh = 0x00,
    BindShader = 0x01,
    Uniform = 0x02,
    Clear = 0x03,
    End = 0xFF,
}

impl CommandType {
    pub fn name(self) -> &'static str {
        match self {
            CommandType::DrawMesh => "DrawMesh",
            CommandType::BindShader => "BindShader",
            CommandType::Uniform => "Uniform",
            CommandType::Clear => "Clear",
            CommandType::End => "End",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for CommandType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(CommandType::DrawMesh),
            0x01 => Ok(CommandType::BindShader),
            0x02 => Ok(CommandType::Uniform),
            0x03 => Ok(CommandType::Clear),
            0xFF => Ok(CommandType::End),
            other => Err(Error::DecodingError(format!("unknown command tag 0x{:02X}", other))),
        }
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// RGBA clear color
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ClearColor {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    fn encode(&self, out: &mut Vec<u8>) {
        for component in [self.r, self.g, self.b, self.a] {
            out.extend_from_slice(&component.to_ne_bytes());
        }
    }

    fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            r: cursor.read_f32("clear color")?,
            g: cursor.read_f32("clear color")?,
            b: cursor.read_f32("clear color")?,
            a: cursor.read_f32("clear color")?,
        })
    }
}

/// Uniform record payload, borrowing its name and data
///
/// `data` holds `size_x * size_y` elements of `data_type`, column-major for
/// matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformData<'a> {
    pub data_type: DataType,
    pub size_x: u8,
    pub size_y: u8,
    pub name: &'a str,
    pub data: &'a [u8],
}

impl<'a> UniformData<'a> {
    /// Check that the record can be encoded without truncation
    ///
    /// # Errors
    ///
    /// `Error::EncodingError` if the name holds a NUL byte or does not fit
    /// its length prefix with the terminator, if the data does not fit its
    /// length prefix, if a dimension is outside `1..=15`, or if the data
    /// length disagrees with the declared shape.
    pub fn validate(&self) -> Result<()> {
        if self.name.contains('\0') {
            return Err(Error::EncodingError(format!(
                "uniform name {:?} contains a NUL byte", self.name
            )));
        }
        if self.name.len() + 1 > MAX_PREFIXED_LEN {
            return Err(Error::EncodingError(format!(
                "uniform name is {} bytes, at most {} fit with the terminator",
                self.name.len(), MAX_PREFIXED_LEN - 1
            )));
        }
        if self.data.len() > MAX_PREFIXED_LEN {
            return Err(Error::EncodingError(format!(
                "uniform '{}' carries {} bytes of data, at most {} fit",
                self.name, self.data.len(), MAX_PREFIXED_LEN
            )));
        }
        for (axis, size) in [("x", self.size_x), ("y", self.size_y)] {
            if size == 0 || size > MAX_UNIFORM_SIZE {
                return Err(Error::EncodingError(format!(
                    "uniform '{}' size_{} is {}, expected 1..={}",
                    self.name, axis, size, MAX_UNIFORM_SIZE
                )));
            }
        }
        let expected = self.data_type.element_size() * self.size_x as usize * self.size_y as usize;
        if self.data.len() != expected {
            return Err(Error::EncodingError(format!(
                "uniform '{}' is {}x{} {} ({} bytes) but {} bytes were given",
                self.name, self.size_x, self.size_y, self.data_type, expected, self.data.len()
            )));
        }
        Ok(())
    }

    /// Number of elements declared by the shape
    pub fn element_count(&self) -> usize {
        self.size_x as usize * self.size_y as usize
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        self.validate()?;
        out.push(self.data_type as u8);
        out.push((self.size_x & 0x0F) | (self.size_y << 4));
        // Lengths were bounded by validate()
        out.push((self.name.len() + 1) as u8);
        out.extend_from_slice(self.name.as_bytes());
        out.push(0);
        out.push(self.data.len() as u8);
        out.extend_from_slice(self.data);
        Ok(())
    }

    fn decode(cursor: &mut ByteCursor<'a>) -> Result<Self> {
        let data_type = DataType::try_from(cursor.read_u8("uniform data type")?)?;
        let sizes = cursor.read_u8("uniform sizes")?;

        let name_len = cursor.read_u8("uniform name length")? as usize;
        let name_bytes = cursor.take(name_len, "uniform name")?;
        let name_bytes = match name_bytes.split_last() {
            Some((&0, name)) => name,
            _ => {
                return Err(Error::DecodingError(
                    "uniform name is not NUL terminated".to_string()
                ));
            }
        };
        let name = std::str::from_utf8(name_bytes).map_err(|e| Error::DecodingError(format!(
            "uniform name is not valid UTF-8: {}", e
        )))?;

        let data_len = cursor.read_u8("uniform data length")? as usize;
        let data = cursor.take(data_len, "uniform data")?;

        Ok(Self {
            data_type,
            size_x: sizes & 0x0F,
            size_y: sizes >> 4,
            name,
            data,
        })
    }
}

// ============================================================================
// Command
// ============================================================================

/// One decoded (or to-be-encoded) record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command<'a> {
    Clear(ClearColor),
    BindShader(ShaderHandle),
    DrawMesh(MeshHandle),
    Uniform(UniformData<'a>),
    End,
}

impl<'a> Command<'a> {
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Clear(_) => CommandType::Clear,
            Command::BindShader(_) => CommandType::BindShader,
            Command::DrawMesh(_) => CommandType::DrawMesh,
            Command::Uniform(_) => CommandType::Uniform,
            Command::End => CommandType::End,
        }
    }

    /// Append the full record (tag and payload) to `out`
    ///
    /// On error nothing is appended.
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        let start = out.len();
        out.push(self.command_type() as u8);
        let result = match self {
            Command::Clear(color) => {
                color.encode(out);
                Ok(())
            }
            Command::BindShader(handle) => {
                out.extend_from_slice(&handle.to_wire().to_ne_bytes());
                Ok(())
            }
            Command::DrawMesh(handle) => {
                out.extend_from_slice(&handle.to_wire().to_ne_bytes());
                Ok(())
            }
            Command::Uniform(uniform) => uniform.encode(out),
            Command::End => Ok(()),
        };
        if result.is_err() {
            out.truncate(start);
        }
        result
    }

    /// Decode the payload of a record whose tag was already consumed
    pub(crate) fn decode_payload(tag: CommandType, cursor: &mut ByteCursor<'a>) -> Result<Self> {
        match tag {
            CommandType::Clear => Ok(Command::Clear(ClearColor::decode(cursor)?)),
            CommandType::BindShader => Ok(Command::BindShader(
                ShaderHandle::from_wire(cursor.read_u64("shader handle")?)
            )),
            CommandType::DrawMesh => Ok(Command::DrawMesh(
                MeshHandle::from_wire(cursor.read_u64("mesh handle")?)
            )),
            CommandType::Uniform => Ok(Command::Uniform(UniformData::decode(cursor)?)),
            CommandType::End => Ok(Command::End),
        }
    }
}

// ============================================================================
// ByteCursor
// ============================================================================

/// Forward-only view over encoded bytes
#[derive(Debug, Clone)]
pub(crate) struct ByteCursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub(crate) fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::DecodingError(format!(
                "truncated {} at offset {}: need {} bytes, {} left",
                what, self.position, len, self.remaining()
            )));
        }
        let slice = &self.bytes[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    pub(crate) fn read_u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn read_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.take(N, what)?);
        Ok(array)
    }

    pub(crate) fn read_u64(&mut self, what: &str) -> Result<u64> {
        Ok(u64::from_ne_bytes(self.read_array(what)?))
    }

    pub(crate) fn read_f32(&mut self, what: &str) -> Result<f32> {
        Ok(f32::from_ne_bytes(self.read_array(what)?))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
