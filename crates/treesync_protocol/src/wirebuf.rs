//! Wire buffer reader/writer.

use crate::error::{BufError, ProtocolResult};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// A read/write byte buffer for wire data.
///
/// Strings are u32-length-prefixed UTF-8. Reads consume from the
/// front; writes append to the back. Reads past the end or through
/// malformed data return a [`BufError`] and leave no partial value;
/// the buffer position is not rewound, so a failed read ends the
/// useful life of the buffer for its reader.
#[derive(Debug, Default, Clone)]
pub struct WireBuf {
    inner: BytesMut,
}

impl WireBuf {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self {
            inner: BytesMut::new(),
        }
    }

    /// Creates a buffer over existing wire bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            inner: BytesMut::from(bytes),
        }
    }

    /// Appends one byte.
    pub fn write_byte(&mut self, byte: u8) {
        self.inner.put_u8(byte);
    }

    /// Appends a big-endian u32.
    pub fn write_u32(&mut self, value: u32) {
        self.inner.put_u32(value);
    }

    /// Appends a u32-length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) {
        self.inner.put_u32(value.len() as u32);
        self.inner.put_slice(value.as_bytes());
    }

    /// Reads one byte.
    pub fn read_byte(&mut self) -> ProtocolResult<u8> {
        self.check_remaining(1)?;
        Ok(self.inner.get_u8())
    }

    /// Reads a big-endian u32.
    pub fn read_u32(&mut self) -> ProtocolResult<u32> {
        self.check_remaining(4)?;
        Ok(self.inner.get_u32())
    }

    /// Reads a u32-length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> ProtocolResult<String> {
        let len = self.read_u32()? as usize;
        self.check_remaining(len)?;
        let raw = self.inner.split_to(len);
        String::from_utf8(raw.to_vec()).map_err(|_| BufError::InvalidUtf8)
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.inner.len()
    }

    /// Returns true when nothing is left to read.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Freezes the written contents for sending.
    pub fn freeze(self) -> Bytes {
        self.inner.freeze()
    }

    fn check_remaining(&self, needed: usize) -> ProtocolResult<()> {
        let remaining = self.inner.len();
        if remaining < needed {
            return Err(BufError::Underflow { needed, remaining });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_roundtrip() {
        let mut buf = WireBuf::new();
        buf.write_string("players");
        buf.write_string("");
        assert_eq!(buf.read_string().unwrap(), "players");
        assert_eq!(buf.read_string().unwrap(), "");
        assert!(buf.is_empty());
    }

    #[test]
    fn byte_and_u32_roundtrip() {
        let mut buf = WireBuf::new();
        buf.write_byte(0x2A);
        buf.write_u32(1_000_000);
        assert_eq!(buf.read_byte().unwrap(), 0x2A);
        assert_eq!(buf.read_u32().unwrap(), 1_000_000);
    }

    #[test]
    fn empty_buffer_underflows() {
        let mut buf = WireBuf::new();
        assert!(matches!(
            buf.read_string(),
            Err(BufError::Underflow { .. })
        ));
    }

    #[test]
    fn truncated_string_underflows() {
        let mut buf = WireBuf::new();
        buf.write_u32(10);
        buf.write_byte(b'x');
        assert_eq!(
            buf.read_string(),
            Err(BufError::Underflow {
                needed: 10,
                remaining: 1
            })
        );
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let mut buf = WireBuf::new();
        buf.write_u32(2);
        buf.write_byte(0xFF);
        buf.write_byte(0xFE);
        assert_eq!(buf.read_string(), Err(BufError::InvalidUtf8));
    }
}
