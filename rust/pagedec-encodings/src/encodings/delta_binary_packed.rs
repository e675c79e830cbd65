//! Decoder for `DELTA_BINARY_PACKED` encoded 64-bit integers.
//!
//! Layout:
//!
//! ```text
//! page-header := <block size> <miniblocks per block> <total value count> <first value>
//! block       := <min delta> <miniblock bit widths> <miniblocks>
//! ```
//!
//! Header counts are unsigned varints, the first value and min delta are
//! zig-zag varints and each bit width is a single byte. A miniblock holds
//! `block size / miniblocks per block` deltas packed in groups of 8 at its bit
//! width. A page of `n` values stores `n - 1` deltas; the miniblock holding
//! the last delta is padded to its full size.

use crate::{buffer::EncodedBuffer, decoder::Int64Decoder};
use pagedec_bits::bitpacking::{GROUP_SIZE, MAX_BIT_WIDTH, unpack8};
use pagedec_common::{Result, error::Error, try_or_ret_some_err, verify_data};

/// Validation knobs for delta-binary-packed pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaDecoderOptions {
    /// Require the alignment mandated by the Parquet format: block size a
    /// multiple of 128 and miniblock size a multiple of 32.
    pub require_parquet_alignment: bool,

    /// Accept pages whose final miniblock lacks its trailing padding bytes.
    pub allow_missing_tail_padding: bool,
}

impl DeltaDecoderOptions {
    pub fn with_parquet_alignment(&self, require: bool) -> Self {
        let mut options = self.clone();
        options.require_parquet_alignment = require;
        options
    }

    pub fn with_missing_tail_padding(&self, allow: bool) -> Self {
        let mut options = self.clone();
        options.allow_missing_tail_padding = allow;
        options
    }
}

/// Streaming decoder of one delta-binary-packed page.
///
/// The page header is parsed at construction. Block headers and miniblock
/// groups are read lazily as values are requested, so decoding may be split
/// into any number of calls of any size.
///
/// A failed header or group read leaves the block state half advanced, so
/// the first such error is kept and returned by every later call.
#[derive(Debug, Clone)]
pub struct DeltaBinaryPackedDecoder<'a> {
    buffer: EncodedBuffer<'a>,
    options: DeltaDecoderOptions,

    // Page header.
    block_size: usize,
    miniblocks_per_block: usize,
    miniblock_size: usize,
    total_values: usize,
    first_value: i64,

    // Current block.
    min_delta: i64,
    miniblock_widths: Vec<u8>,
    /// Index of the next miniblock to start within the current block.
    next_miniblock: usize,

    // Current miniblock.
    bit_width: usize,
    miniblock_bytes_read: usize,
    group: [u64; GROUP_SIZE],

    // Running state.
    last_value: i64,
    values_read: usize,
    deltas_read: usize,
    failed: Option<Error>,
}

impl<'a> DeltaBinaryPackedDecoder<'a> {
    pub fn try_new(data: &'a [u8]) -> Result<Self> {
        Self::try_new_with_options(data, DeltaDecoderOptions::default())
    }

    pub fn try_new_with_options(data: &'a [u8], options: DeltaDecoderOptions) -> Result<Self> {
        let mut buffer = EncodedBuffer::new(data);
        let block_size = buffer.read_uvarint_u32("block size")? as usize;
        let miniblocks_per_block = buffer.read_uvarint_u32("miniblocks per block")? as usize;
        let total_values = buffer.read_uvarint_u32("total value count")? as usize;
        let first_value = buffer.read_zigzag_varint("first value")?;

        verify_data!(block_size, block_size > 0 && block_size % GROUP_SIZE == 0);
        verify_data!(miniblocks_per_block, miniblocks_per_block > 0);
        verify_data!(block_size, block_size % miniblocks_per_block == 0);
        let miniblock_size = block_size / miniblocks_per_block;
        verify_data!(miniblock_size, miniblock_size % GROUP_SIZE == 0);
        if options.require_parquet_alignment {
            verify_data!(block_size, block_size % 128 == 0);
            verify_data!(miniblock_size, miniblock_size % 32 == 0);
        }

        log::debug!(
            "delta page: {total_values} values, block size {block_size}, \
             {miniblocks_per_block} miniblocks per block"
        );

        Ok(Self {
            buffer,
            options,
            block_size,
            miniblocks_per_block,
            miniblock_size,
            total_values,
            first_value,
            min_delta: 0,
            miniblock_widths: Vec::new(),
            next_miniblock: miniblocks_per_block,
            bit_width: 0,
            miniblock_bytes_read: 0,
            group: [0; GROUP_SIZE],
            last_value: first_value,
            values_read: 0,
            deltas_read: 0,
            failed: None,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn miniblocks_per_block(&self) -> usize {
        self.miniblocks_per_block
    }

    pub fn total_values(&self) -> usize {
        self.total_values
    }

    pub fn values_left(&self) -> usize {
        self.total_values - self.values_read
    }

    /// Byte offset just past the consumed data.
    ///
    /// Once the page is exhausted this is the end of the padded final
    /// miniblock, where any data following the delta stream begins.
    pub fn offset(&self) -> usize {
        self.buffer.offset()
    }

    /// Skips up to `count` values, returning the number skipped.
    pub fn skip_values(&mut self, count: usize) -> Result<usize> {
        let count = count.min(self.values_left());
        for _ in 0..count {
            self.next_value()?;
        }
        Ok(count)
    }

    fn total_deltas(&self) -> usize {
        self.total_values.saturating_sub(1)
    }

    /// Error that stopped decoding, if any.
    pub fn failure(&self) -> Option<&Error> {
        self.failed.as_ref()
    }

    /// Produces the next value. The caller checks `values_left() > 0`.
    #[inline]
    fn next_value(&mut self) -> Result<i64> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        self.advance_value()
            .inspect_err(|err| self.failed = Some(err.clone()))
    }

    #[inline]
    fn advance_value(&mut self) -> Result<i64> {
        if self.values_read == 0 {
            self.values_read = 1;
            self.last_value = self.first_value;
            return Ok(self.first_value);
        }

        let delta_idx = self.deltas_read;
        if delta_idx % GROUP_SIZE == 0 {
            if delta_idx % self.miniblock_size == 0 {
                self.start_miniblock()?;
            }
            self.load_group()?;
        }

        let delta = self.group[delta_idx % GROUP_SIZE] as i64;
        self.last_value = self
            .last_value
            .wrapping_add(delta)
            .wrapping_add(self.min_delta);
        self.deltas_read += 1;
        self.values_read += 1;
        Ok(self.last_value)
    }

    fn start_miniblock(&mut self) -> Result<()> {
        if self.next_miniblock == self.miniblocks_per_block {
            self.read_block_header()?;
        }
        let bit_width = self.miniblock_widths[self.next_miniblock] as usize;
        verify_data!(bit_width, bit_width <= MAX_BIT_WIDTH);
        self.bit_width = bit_width;
        self.miniblock_bytes_read = 0;
        self.next_miniblock += 1;
        Ok(())
    }

    fn read_block_header(&mut self) -> Result<()> {
        self.min_delta = self.buffer.read_zigzag_varint("min delta")?;
        let widths = self
            .buffer
            .read_bytes(self.miniblocks_per_block, "miniblock bit widths")?;
        self.miniblock_widths.clear();
        self.miniblock_widths.extend_from_slice(widths);
        self.next_miniblock = 0;
        log::trace!(
            "delta block at delta {}: min delta {}, bit widths {:?}",
            self.deltas_read,
            self.min_delta,
            self.miniblock_widths
        );
        Ok(())
    }

    fn load_group(&mut self) -> Result<()> {
        let width = self.bit_width;
        let packed = self.buffer.read_bytes(width, "miniblock group")?;
        self.group = unpack8(packed, width);
        self.miniblock_bytes_read += width;

        // The group holding the final delta is the last one read; skip the
        // padding up to the end of its miniblock.
        if self.deltas_read + GROUP_SIZE >= self.total_deltas() {
            let miniblock_len = self.miniblock_size / GROUP_SIZE * width;
            let padding = miniblock_len - self.miniblock_bytes_read;
            if self.buffer.remaining() < padding && self.options.allow_missing_tail_padding {
                self.buffer.advance_to_end();
            } else {
                self.buffer.advance(padding, "miniblock padding")?;
            }
        }
        Ok(())
    }
}

impl Int64Decoder for DeltaBinaryPackedDecoder<'_> {
    fn decode_i64(&mut self, dst: &mut [i64]) -> Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }
        let count = dst.len().min(self.values_left());
        if count == 0 {
            return Err(Error::no_more_data());
        }
        for slot in &mut dst[..count] {
            *slot = self.next_value()?;
        }
        Ok(count)
    }
}

impl Iterator for DeltaBinaryPackedDecoder<'_> {
    type Item = Result<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.values_left() == 0 || self.failed.is_some() {
            return None;
        }
        Some(Ok(try_or_ret_some_err!(self.next_value())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed.is_some() {
            return (0, Some(0));
        }
        (self.values_left(), Some(self.values_left()))
    }
}
