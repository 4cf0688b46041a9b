/// CommandBufferReader - forward-only decoder over recorded command bytes
///
/// Reading is two-step: `read_type()` consumes a tag byte, then the matching
/// `read_*` consumes its payload. The reader remembers the tag it returned
/// and refuses payload reads that do not match it. `next_command()` does
/// both steps at once.

use crate::error::{Error, Result};
use crate::renderer::{
    ByteCursor, ClearColor, Command, CommandType, MeshHandle, ShaderHandle, UniformData,
};

/// Decoder paired with `CommandBuffer`
///
/// Borrows the bytes, never copies or mutates them.
#[derive(Debug, Clone)]
pub struct CommandBufferReader<'a> {
    cursor: ByteCursor<'a>,
    pending: Option<CommandType>,
    finished: bool,
}

impl<'a> CommandBufferReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            pending: None,
            finished: false,
        }
    }

    /// Byte offset of the next unread byte
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Whether the End record has been consumed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consume the next tag byte
    ///
    /// Reading `End` finishes the reader; any later read fails.
    ///
    /// # Errors
    ///
    /// `Error::DecodingError` if a payload is still pending, if the reader is
    /// finished, if the bytes run out before `End`, or if the tag is unknown.
    pub fn read_type(&mut self) -> Result<CommandType> {
        if self.finished {
            return Err(Error::DecodingError("read past the End record".to_string()));
        }
        if let Some(pending) = self.pending {
            return Err(Error::DecodingError(format!(
                "payload of {} at offset {} was not read", pending, self.cursor.position()
            )));
        }
        if self.cursor.remaining() == 0 {
            return Err(Error::DecodingError(format!(
                "command buffer ended at offset {} without an End record", self.cursor.position()
            )));
        }

        let tag = CommandType::try_from(self.cursor.read_u8("command tag")?)?;
        if tag == CommandType::End {
            self.finished = true;
        } else {
            self.pending = Some(tag);
        }
        crate::engine_trace!("av::CommandBufferReader", "Read {} at offset {}",
            tag, self.cursor.position() - 1);
        Ok(tag)
    }

    fn take_payload(&mut self, expected: CommandType) -> Result<Command<'a>> {
        match self.pending {
            Some(tag) if tag == expected => {}
            Some(tag) => {
                return Err(Error::DecodingError(format!(
                    "expected to read {} payload but the pending record is {}", expected, tag
                )));
            }
            None => {
                return Err(Error::DecodingError(format!(
                    "read of {} payload without a preceding read_type()", expected
                )));
            }
        }
        let command = Command::decode_payload(expected, &mut self.cursor)?;
        self.pending = None;
        Ok(command)
    }

    pub fn read_clear(&mut self) -> Result<ClearColor> {
        match self.take_payload(CommandType::Clear)? {
            Command::Clear(color) => Ok(color),
            other => Err(Self::unexpected(CommandType::Clear, &other)),
        }
    }

    pub fn read_bind_shader(&mut self) -> Result<ShaderHandle> {
        match self.take_payload(CommandType::BindShader)? {
            Command::BindShader(handle) => Ok(handle),
            other => Err(Self::unexpected(CommandType::BindShader, &other)),
        }
    }

    pub fn read_draw_mesh(&mut self) -> Result<MeshHandle> {
        match self.take_payload(CommandType::DrawMesh)? {
            Command::DrawMesh(handle) => Ok(handle),
            other => Err(Self::unexpected(CommandType::DrawMesh, &other)),
        }
    }

    /// Decode a uniform record, borrowing name and data from the buffer
    pub fn read_uniform(&mut self) -> Result<UniformData<'a>> {
        match self.take_payload(CommandType::Uniform)? {
            Command::Uniform(uniform) => Ok(uniform),
            other => Err(Self::unexpected(CommandType::Uniform, &other)),
        }
    }

    fn unexpected(expected: CommandType, got: &Command<'_>) -> Error {
        Error::DecodingError(format!(
            "decoded {} while reading {}", got.command_type(), expected
        ))
    }

    /// Read a tag and its payload in one step
    pub fn next_command(&mut self) -> Result<Command<'a>> {
        let tag = self.read_type()?;
        if tag == CommandType::End {
            return Ok(Command::End);
        }
        self.take_payload(tag)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "command_buffer_reader_tests.rs"]
mod tests;
