use crate::error::CodecError;

/// A byte buffer meant for reading: a forward-only cursor over a borrowed
/// slice. There is no seeking and no rewinding; reading past the end fails
/// with [`CodecError::StreamUnderflow`] and never returns zeroed or partial
/// data.
///
/// Example usage:
///
/// ```
/// let mut reader = shapewire_schema::ByteReader::new(&[3, 0, 97, 98, 99, 1]);
/// assert_eq!(reader.read_text(), Ok("abc".to_owned()));
/// assert_eq!(reader.read_bool(), Ok(true));
/// ```
pub struct ByteReader<'a> {
    data: &'a [u8],
    index: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a new ByteReader over the provided byte slice.
    pub fn new(data: &[u8]) -> ByteReader {
        ByteReader { data, index: 0 }
    }

    /// The number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.index
    }

    /// The current index into the underlying slice. Starts at 0 and ends up
    /// as `data.len()` once everything has been read.
    pub fn index(&self) -> usize {
        self.index
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < len {
            return Err(CodecError::StreamUnderflow {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.index..self.index + len];
        self.index += len;
        Ok(bytes)
    }

    /// Try to read `len` raw bytes starting at the current index.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        self.take(len)
    }

    /// Try to read a boolean. Anything other than 0 or 1 is rejected rather
    /// than coerced.
    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::ProtocolMismatch(format!(
                "invalid boolean byte {other}"
            ))),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, CodecError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_i16(&mut self) -> Result<i16, CodecError> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_f32(&mut self) -> Result<f32, CodecError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, CodecError> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// A `char` travels as its `u32` scalar value; not every `u32` is a valid
    /// scalar value, so an out-of-range read is a protocol mismatch.
    pub fn read_char(&mut self) -> Result<char, CodecError> {
        let raw = self.read_u32()?;
        char::from_u32(raw).ok_or_else(|| {
            CodecError::ProtocolMismatch(format!("invalid char scalar value {raw:#x}"))
        })
    }

    /// Try to read a length-prefixed UTF-8 string: a `u16` byte count
    /// followed by that many bytes.
    pub fn read_text(&mut self) -> Result<String, CodecError> {
        let len = self.read_u16()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| CodecError::ProtocolMismatch(format!("text is not valid UTF-8: {e}")))
    }
}

/// A byte buffer meant for writing: a single contiguous append-only store.
///
/// Example usage:
///
/// ```
/// let mut writer = shapewire_schema::ByteWriter::new();
/// writer.write_text("abc").unwrap();
/// writer.write_bool(true);
/// assert_eq!(writer.data(), [3, 0, 97, 98, 99, 1]);
/// ```
pub struct ByteWriter {
    data: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty ByteWriter ready for writing.
    pub fn new() -> ByteWriter {
        ByteWriter { data: vec![] }
    }

    /// Consumes this buffer and returns the underlying backing store. Use
    /// this to get the data out when you're done writing.
    pub fn data(self) -> Vec<u8> {
        self.data
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn write_bytes(&mut self, value: &[u8]) {
        self.data.extend_from_slice(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.data.push(if value { 1 } else { 0 });
    }

    pub fn write_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.data.push(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.data.extend_from_slice(&value.to_bits().to_le_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.data.extend_from_slice(&value.to_bits().to_le_bytes());
    }

    pub fn write_char(&mut self, value: char) {
        self.write_u32(value as u32);
    }

    /// Write a UTF-8 string as a `u16` byte count followed by the bytes.
    /// Text longer than `u16::MAX` bytes does not fit the prefix.
    pub fn write_text(&mut self, value: &str) -> Result<(), CodecError> {
        let bytes = value.as_bytes();
        let len = u16::try_from(bytes.len()).map_err(|_| {
            CodecError::Argument(format!(
                "text of {} bytes exceeds the u16 length prefix",
                bytes.len()
            ))
        })?;
        self.write_u16(len);
        self.data.extend_from_slice(bytes);
        Ok(())
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        ByteWriter::new()
    }
}
