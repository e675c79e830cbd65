//! RLE/bit-packing hybrid decoder for dictionary keys.
//!
//! See <https://parquet.apache.org/docs/file-format/data-pages/encodings/#run-length-encoding--bit-packing-hybrid-rle--3>

use crate::buffer::EncodedBuffer;
use pagedec_bits::bitpacking::{GROUP_SIZE, unpack8};
use pagedec_common::{Result, error::Error, verify_data};

/// Largest bit width of a dictionary key.
pub const MAX_KEY_BIT_WIDTH: usize = 32;

/// Source of dictionary keys for [`super::dictionary::DictionaryDecoder`].
pub trait KeyDecoder {
    /// Decodes the next `count` keys.
    ///
    /// Returns exactly `count` keys or an error. The returned slice is valid
    /// until the next call.
    fn decode_keys(&mut self, count: usize) -> Result<&[u32]>;
}

/// RLE/bit-packed hybrid key decoder.
#[derive(Debug, Clone)]
pub struct HybridRleDecoder<'a> {
    buffer: EncodedBuffer<'a>,
    bit_width: usize,
    /// Remaining repetitions of `rle_value` in the current RLE run.
    rle_left: usize,
    rle_value: u32,
    /// Remaining values in the current bit-packed run.
    packed_left: usize,
    group: [u64; GROUP_SIZE],
    /// Next value to take from `group`; `GROUP_SIZE` when a new group is due.
    group_pos: usize,
    keys: Vec<u32>,
}

impl<'a> HybridRleDecoder<'a> {
    pub fn try_new(data: &'a [u8], bit_width: usize) -> Result<Self> {
        if bit_width > MAX_KEY_BIT_WIDTH {
            return Err(Error::invalid_arg(
                "bit_width",
                format!("{bit_width} exceeds {MAX_KEY_BIT_WIDTH}"),
            ));
        }
        Ok(Self {
            buffer: EncodedBuffer::new(data),
            bit_width,
            rle_left: 0,
            rle_value: 0,
            packed_left: 0,
            group: [0; GROUP_SIZE],
            group_pos: GROUP_SIZE,
            keys: Vec::new(),
        })
    }

    /// Creates a decoder over a dictionary-encoded data page, whose first
    /// byte holds the key bit width.
    pub fn from_indices_page(page: &'a [u8]) -> Result<Self> {
        let Some((&bit_width, data)) = page.split_first() else {
            return Err(Error::truncated("dictionary key bit width"));
        };
        let bit_width = bit_width as usize;
        verify_data!(bit_width, bit_width <= MAX_KEY_BIT_WIDTH);
        Self::try_new(data, bit_width)
    }

    pub fn bit_width(&self) -> usize {
        self.bit_width
    }

    fn read_run_header(&mut self) -> Result<()> {
        let header = self.buffer.read_uvarint("hybrid run header")?;
        let run_len = usize::try_from(header >> 1)
            .map_err(|_| Error::invalid_format("hybrid run header", "run is too long"))?;
        if header & 1 == 1 {
            self.packed_left = run_len.checked_mul(GROUP_SIZE).ok_or_else(|| {
                Error::invalid_format("hybrid run header", "bit-packed run is too long")
            })?;
            self.group_pos = GROUP_SIZE;
        } else {
            let bytes = self
                .buffer
                .read_bytes(self.bit_width.div_ceil(8), "rle run value")?;
            let value = bytes
                .iter()
                .rev()
                .fold(0u64, |acc, &b| (acc << 8) | b as u64);
            verify_data!(rle_value, value >> self.bit_width == 0);
            self.rle_value = value as u32;
            self.rle_left = run_len;
        }
        Ok(())
    }

    fn load_group(&mut self) -> Result<()> {
        let width = self.bit_width;
        if self.buffer.remaining() >= width {
            self.group = unpack8(self.buffer.read_bytes(width, "bit-packed group")?, width);
        } else {
            // Some writers drop the unused tail of the final group. Only the
            // values fully present in the remaining bytes are kept.
            let rest = self.buffer.rest();
            let mut padded = [0u8; MAX_KEY_BIT_WIDTH];
            padded[..rest.len()].copy_from_slice(rest);
            self.group = unpack8(&padded, width);
            self.packed_left = self.packed_left.min(rest.len() * 8 / width);
            self.buffer.advance_to_end();
        }
        self.group_pos = 0;
        Ok(())
    }
}

impl KeyDecoder for HybridRleDecoder<'_> {
    fn decode_keys(&mut self, count: usize) -> Result<&[u32]> {
        self.keys.clear();
        self.keys.reserve(count);
        while self.keys.len() < count {
            let wanted = count - self.keys.len();
            if self.rle_left > 0 {
                let n = wanted.min(self.rle_left);
                self.keys.extend(std::iter::repeat_n(self.rle_value, n));
                self.rle_left -= n;
            } else if self.packed_left > 0 {
                if self.group_pos == GROUP_SIZE {
                    self.load_group()?;
                    continue;
                }
                let n = wanted
                    .min(self.packed_left)
                    .min(GROUP_SIZE - self.group_pos);
                let group = &self.group[self.group_pos..self.group_pos + n];
                self.keys.extend(group.iter().map(|&key| key as u32));
                self.group_pos += n;
                self.packed_left -= n;
            } else if self.buffer.is_exhausted() {
                return Err(if self.keys.is_empty() {
                    Error::no_more_data()
                } else {
                    Error::truncated("dictionary keys")
                });
            } else {
                self.read_run_header()?;
            }
        }
        Ok(&self.keys)
    }
}
