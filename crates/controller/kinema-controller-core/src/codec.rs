//! Deterministic binary layer for the controller format.
//!
//! Little-endian scalars and length-prefixed strings with explicit
//! caps. Readers never panic on truncated or oversized input; every
//! malformed shape surfaces as a `CodecError`.

use thiserror::Error;

/// Errors produced by codec readers and bounded writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Attempted to read beyond the end of the stream.
    #[error("stream too short")]
    OutOfBounds,
    /// UTF-8 decoding failed.
    #[error("invalid utf-8")]
    InvalidUtf8,
    /// String length exceeded its cap.
    #[error("string too long")]
    StringTooLong,
    /// Length prefix exceeded its cap.
    #[error("length prefix too large")]
    LengthTooLarge,
    /// A tag byte did not name a known variant.
    #[error("invalid tag byte {0}")]
    InvalidTag(u8),
    /// An index or derived value disagreed with the rest of the stream.
    #[error("value out of range")]
    OutOfRange,
    /// Nested structures exceeded the depth guard.
    #[error("nesting too deep")]
    TooDeep,
}

/// Append-only writer for little-endian scalars and bounded strings.
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write length-prefixed bytes (u32 length, then the bytes).
    pub fn write_len_prefixed(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        let len: u32 = bytes
            .len()
            .try_into()
            .map_err(|_| CodecError::LengthTooLarge)?;
        self.write_u32(len);
        self.write_bytes(bytes);
        Ok(())
    }

    /// Write a length-prefixed UTF-8 string bounded by `max_len` bytes.
    pub fn write_string(&mut self, value: &str, max_len: usize) -> Result<(), CodecError> {
        let bytes = value.as_bytes();
        if bytes.len() > max_len {
            return Err(CodecError::StringTooLong);
        }
        self.write_len_prefixed(bytes)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over an immutable byte stream.
#[derive(Debug)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// True once every byte has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.offset == self.bytes.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let end = self
            .offset
            .checked_add(len)
            .ok_or(CodecError::OutOfBounds)?;
        if end > self.bytes.len() {
            return Err(CodecError::OutOfBounds);
        }
        let out = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(out)
    }

    /// Read exactly `N` raw bytes.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let chunk = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    /// Strict boolean: anything other than 0 or 1 is a bad tag.
    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidTag(other)),
        }
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, CodecError> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Read a length-prefixed byte slice bounded by `max_len`.
    pub fn read_len_prefixed(&mut self, max_len: usize) -> Result<&'a [u8], CodecError> {
        let len = self.read_u32()? as usize;
        if len > max_len {
            return Err(CodecError::LengthTooLarge);
        }
        self.take(len)
    }

    /// Read a length-prefixed UTF-8 string bounded by `max_len` bytes.
    pub fn read_string(&mut self, max_len: usize) -> Result<String, CodecError> {
        let bytes = self.read_len_prefixed(max_len)?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| CodecError::InvalidUtf8)
    }
}
