//! Unsigned LEB128 and zig-zag varint parsing.
//!
//! All readers return `Some((value, bytes_consumed))` on success and `None`
//! when the input is empty, ends before the terminating byte, or encodes a
//! value that does not fit the target type.

/// Maximum encoded length of a 64-bit varint.
pub const MAX_VARINT_LEN_64: usize = 10;

/// Reads an unsigned LEB128 varint of up to 64 bits.
#[inline]
pub fn read_uvarint(buf: &[u8]) -> Option<(u64, usize)> {
    let mut value = 0u64;
    for (i, &byte) in buf.iter().take(MAX_VARINT_LEN_64).enumerate() {
        let payload = (byte & 0x7f) as u64;
        if i == MAX_VARINT_LEN_64 - 1 && payload > 1 {
            return None;
        }
        value |= payload << (7 * i);
        if byte & 0x80 == 0 {
            return Some((value, i + 1));
        }
    }
    None
}

/// Reads an unsigned varint which must fit into 32 bits.
#[inline]
pub fn read_uvarint_u32(buf: &[u8]) -> Option<(u32, usize)> {
    let (value, len) = read_uvarint(buf)?;
    u32::try_from(value).ok().map(|v| (v, len))
}

/// Reads a zig-zag encoded signed varint.
#[inline]
pub fn read_zigzag_varint(buf: &[u8]) -> Option<(i64, usize)> {
    let (value, len) = read_uvarint(buf)?;
    Some((zigzag_decode(value), len))
}

#[inline]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}
