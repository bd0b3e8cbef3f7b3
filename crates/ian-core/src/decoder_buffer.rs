use byteorder::{ByteOrder, LittleEndian};

use crate::status::IanError;

/// Input buffer for reading .ian data.
///
/// `DecoderBuffer` is a positioned cursor over an immutable byte slice.
/// Every typed read validates bounds before touching the data and advances
/// the cursor only on success.
///
/// # Example
///
/// ```
/// use ian_core::decoder_buffer::DecoderBuffer;
///
/// let data = [0x78, 0x00, 0x00, 0x00, b'a', 0x00];
/// let mut buffer = DecoderBuffer::new(&data);
///
/// assert_eq!(buffer.decode_u32().unwrap(), 120);
/// assert_eq!(buffer.decode_string().unwrap(), "a");
/// assert_eq!(buffer.remaining_size(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct DecoderBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> DecoderBuffer<'a> {
    /// Creates a new `DecoderBuffer` from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current read position in bytes.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the total length of the underlying data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sets the read position.
    ///
    /// # Errors
    ///
    /// Returns `IanError::OutOfBounds` if the position is beyond the buffer
    /// length. Seeking exactly to the end is allowed.
    pub fn set_position(&mut self, pos: usize) -> Result<(), IanError> {
        if pos > self.data.len() {
            return Err(IanError::out_of_bounds("seek target", pos, 0, self.data.len()));
        }
        self.pos = pos;
        Ok(())
    }

    /// Returns the number of bytes remaining in the buffer.
    pub fn remaining_size(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns a slice of the remaining data without advancing.
    pub fn remaining_data(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Advances the position by `n` bytes without reading.
    pub fn advance(&mut self, n: usize) -> Result<(), IanError> {
        self.check("skipped bytes", n)?;
        self.pos += n;
        Ok(())
    }

    fn check(&self, field: &'static str, size: usize) -> Result<(), IanError> {
        if size > self.remaining_size() {
            return Err(IanError::out_of_bounds(
                field,
                self.pos,
                size,
                self.remaining_size(),
            ));
        }
        Ok(())
    }

    /// Decodes a little-endian u16.
    pub fn decode_u16(&mut self) -> Result<u16, IanError> {
        let bytes = self.take("u16", 2)?;
        Ok(LittleEndian::read_u16(bytes))
    }

    /// Decodes a little-endian u32.
    pub fn decode_u32(&mut self) -> Result<u32, IanError> {
        let bytes = self.take("u32", 4)?;
        Ok(LittleEndian::read_u32(bytes))
    }

    /// Decodes a little-endian f32.
    pub fn decode_f32(&mut self) -> Result<f32, IanError> {
        let bytes = self.take("f32", 4)?;
        Ok(LittleEndian::read_f32(bytes))
    }

    /// Decodes three consecutive little-endian f32 values.
    pub fn decode_vec3(&mut self) -> Result<[f32; 3], IanError> {
        let bytes = self.take("vec3", 12)?;
        let mut out = [0.0; 3];
        LittleEndian::read_f32_into(bytes, &mut out);
        Ok(out)
    }

    /// Decodes a null-terminated ASCII string.
    ///
    /// Reading stops at the first `0x00` byte or at the end of the buffer.
    /// The cursor moves past the terminator when one is present. Bytes are
    /// mapped one-to-one onto chars so non-ASCII input never fails.
    pub fn decode_string(&mut self) -> Result<String, IanError> {
        let rest = self.remaining_data();
        let len = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
        let s = rest[..len].iter().map(|&b| b as char).collect();
        self.pos += len;
        if self.pos < self.data.len() {
            // terminator
            self.pos += 1;
        }
        Ok(s)
    }

    /// Decodes bytes into the provided buffer.
    ///
    /// # Errors
    ///
    /// Returns `IanError::OutOfBounds` if not enough bytes remaining.
    pub fn decode_bytes(&mut self, out: &mut [u8]) -> Result<(), IanError> {
        let bytes = self.take("bytes", out.len())?;
        out.copy_from_slice(bytes);
        Ok(())
    }

    /// Decodes and returns a slice of the specified size.
    ///
    /// # Errors
    ///
    /// Returns `IanError::OutOfBounds` if not enough bytes remaining.
    pub fn decode_slice(&mut self, size: usize) -> Result<&'a [u8], IanError> {
        self.take("bytes", size)
    }

    fn take(&mut self, field: &'static str, size: usize) -> Result<&'a [u8], IanError> {
        self.check(field, size)?;
        let slice = &self.data[self.pos..self.pos + size];
        self.pos += size;
        Ok(slice)
    }
}
