use byteorder::{ByteOrder, LittleEndian};
use pagedec_bits::varint;
use pagedec_common::{Result, error::Error};

/// Read cursor over one page's encoded payload.
///
/// The cursor never moves past the end of the data. Readers take the name of
/// the element being read so that errors point at the offending field.
#[derive(Debug, Clone)]
pub struct EncodedBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> EncodedBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Byte offset of the next unread byte.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Unread part of the buffer.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Takes the next `len` bytes.
    #[inline]
    pub fn read_bytes(&mut self, len: usize, element: &str) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::truncated(element));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    #[inline]
    pub fn read_i64_le(&mut self, element: &str) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.read_bytes(8, element)?))
    }

    pub fn read_uvarint(&mut self, element: &str) -> Result<u64> {
        self.read_varint_with(varint::read_uvarint, element)
    }

    pub fn read_uvarint_u32(&mut self, element: &str) -> Result<u32> {
        self.read_varint_with(varint::read_uvarint_u32, element)
    }

    pub fn read_zigzag_varint(&mut self, element: &str) -> Result<i64> {
        self.read_varint_with(varint::read_zigzag_varint, element)
    }

    /// Moves the cursor forward by `len` bytes.
    pub fn advance(&mut self, len: usize, element: &str) -> Result<()> {
        if self.remaining() < len {
            return Err(Error::truncated(element));
        }
        self.pos += len;
        Ok(())
    }

    /// Moves the cursor to the end of the buffer.
    pub fn advance_to_end(&mut self) {
        self.pos = self.data.len();
    }

    // An empty remainder means the field is missing altogether; anything
    // else that fails to parse is a broken varint.
    #[inline]
    fn read_varint_with<T>(
        &mut self,
        parse: fn(&[u8]) -> Option<(T, usize)>,
        element: &str,
    ) -> Result<T> {
        if self.is_exhausted() {
            return Err(Error::truncated(element));
        }
        let (value, len) = parse(self.rest()).ok_or_else(|| Error::malformed_varint(element))?;
        self.pos += len;
        Ok(value)
    }
}
