//! Width-indexed unpacking of 8-value bit-packed groups.
//!
//! A group of 8 values packed at `W` bits occupies exactly `W` bytes. Values
//! are packed LSB first: value 0 occupies bits `0..W` of the little-endian
//! bit stream, value 1 bits `W..2W` and so on. This is the layout used by the
//! Parquet bit-packed and delta-binary-packed encodings.
//!
//! # Example
//!
//! ```rust
//! use pagedec_bits::bitpacking::unpack8;
//!
//! // 3-bit values 0..8 packed LSB first.
//! let packed = [0b10_001_000, 0b1_100_011_0, 0b111_110_10];
//! assert_eq!(unpack8(&packed, 3), [0, 1, 2, 3, 4, 5, 6, 7]);
//! ```

use arrayref::array_ref;
use seq_macro::seq;

/// Number of values in one packed group.
pub const GROUP_SIZE: usize = 8;

/// Largest supported bit width.
pub const MAX_BIT_WIDTH: usize = 64;

/// Unpacks one group of 8 values from a slice of at least `W` bytes.
pub type Unpack8Fn = fn(&[u8]) -> [u64; GROUP_SIZE];

// 64 packed bytes plus room for a 16-byte window starting at byte 56.
const WINDOW_LEN: usize = 72;

/// Unpack functions indexed by bit width, `0..=64`.
pub static UNPACK8_BY_WIDTH: [Unpack8Fn; MAX_BIT_WIDTH + 1] =
    seq!(W in 0..=64 { [ #( unpack8_width::<W>, )* ] });

/// Unpacks 8 values packed at `width` bits from the start of `packed`.
///
/// # Panics
///
/// Panics if `width > 64` or `packed` is shorter than `width` bytes. Decoders
/// validate both before calling.
#[inline]
pub fn unpack8(packed: &[u8], width: usize) -> [u64; GROUP_SIZE] {
    UNPACK8_BY_WIDTH[width](packed)
}

#[inline]
fn unpack8_width<const W: usize>(packed: &[u8]) -> [u64; GROUP_SIZE] {
    let mut values = [0u64; GROUP_SIZE];
    if W == 0 {
        return values;
    }
    let mut window = [0u8; WINDOW_LEN];
    window[..W].copy_from_slice(&packed[..W]);
    let mask = if W == 64 {
        u64::MAX
    } else {
        (1u64 << (W % 64)) - 1
    };
    for (i, value) in values.iter_mut().enumerate() {
        let bit = i * W;
        let word = u128::from_le_bytes(*array_ref![window, bit / 8, 16]);
        *value = (word >> (bit % 8)) as u64 & mask;
    }
    values
}
