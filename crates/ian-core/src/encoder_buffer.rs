use byteorder::{ByteOrder, LittleEndian};

use crate::status::IanError;

/// Fixed-size output buffer for .ian serialization.
///
/// The encoder knows the final file size up front, so the buffer is
/// allocated zero-filled and written through a cursor. Bytes that are
/// skipped keep their zero value. Writes that would run past the end fail
/// instead of growing the buffer.
#[derive(Debug, Clone)]
pub struct EncoderBuffer {
    /// Main buffer data
    buffer: Vec<u8>,

    /// Current write position
    pos: usize,
}

impl EncoderBuffer {
    /// Create a zero-filled buffer of exactly `size` bytes
    pub fn with_size(size: usize) -> Self {
        Self {
            buffer: vec![0; size],
            pos: 0,
        }
    }

    /// Get the current buffer data
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the buffer size
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Get the current write position
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the cursor and the end of the buffer
    pub fn remaining_size(&self) -> usize {
        self.buffer.len().saturating_sub(self.pos)
    }

    /// Consume the buffer and return its bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.buffer
    }

    /// Move the write cursor. Seeking to the very end is allowed.
    pub fn set_position(&mut self, pos: usize) -> Result<(), IanError> {
        if pos > self.buffer.len() {
            return Err(IanError::out_of_bounds("seek target", pos, 0, self.buffer.len()));
        }
        self.pos = pos;
        Ok(())
    }

    /// Leave `n` bytes untouched
    pub fn skip(&mut self, n: usize) -> Result<(), IanError> {
        self.slot("skipped bytes", n)?;
        Ok(())
    }

    pub fn encode_u16(&mut self, value: u16) -> Result<(), IanError> {
        LittleEndian::write_u16(self.slot("u16", 2)?, value);
        Ok(())
    }

    pub fn encode_u32(&mut self, value: u32) -> Result<(), IanError> {
        LittleEndian::write_u32(self.slot("u32", 4)?, value);
        Ok(())
    }

    pub fn encode_f32(&mut self, value: f32) -> Result<(), IanError> {
        LittleEndian::write_f32(self.slot("f32", 4)?, value);
        Ok(())
    }

    pub fn encode_vec3(&mut self, value: [f32; 3]) -> Result<(), IanError> {
        LittleEndian::write_f32_into(&value, self.slot("vec3", 12)?);
        Ok(())
    }

    /// Encode raw bytes
    pub fn encode(&mut self, data: &[u8]) -> Result<(), IanError> {
        self.slot("bytes", data.len())?.copy_from_slice(data);
        Ok(())
    }

    fn slot(&mut self, field: &'static str, size: usize) -> Result<&mut [u8], IanError> {
        if size > self.remaining_size() {
            return Err(IanError::out_of_bounds(
                field,
                self.pos,
                size,
                self.remaining_size(),
            ));
        }
        let start = self.pos;
        self.pos += size;
        Ok(&mut self.buffer[start..start + size])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_buffer_creation() {
        let buf = EncoderBuffer::with_size(16);
        assert_eq!(buf.size(), 16);
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.data(), &[0; 16]);
    }

    #[test]
    fn test_byte_aligned_encoding() {
        let mut buf = EncoderBuffer::with_size(10);
        buf.encode_u32(0x12345678).unwrap();
        buf.encode_u16(0xABCD).unwrap();
        buf.encode_f32(1.0).unwrap();

        assert_eq!(
            buf.data(),
            &[0x78, 0x56, 0x34, 0x12, 0xCD, 0xAB, 0x00, 0x00, 0x80, 0x3F]
        );
        assert_eq!(buf.remaining_size(), 0);
    }

    #[test]
    fn test_skip_leaves_zeros() {
        let mut buf = EncoderBuffer::with_size(6);
        buf.skip(4).unwrap();
        buf.encode(b"hi").unwrap();
        assert_eq!(buf.into_vec(), b"\0\0\0\0hi".to_vec());
    }

    #[test]
    fn test_error_conditions() {
        let mut buf = EncoderBuffer::with_size(3);
        assert!(buf.encode_u32(1).is_err());
        // A failed write leaves the cursor where it was.
        assert_eq!(buf.position(), 0);
        assert!(buf.encode(b"abcd").is_err());
        assert!(buf.set_position(4).is_err());
        buf.set_position(3).unwrap();
        assert!(buf.skip(1).is_err());
    }
}
