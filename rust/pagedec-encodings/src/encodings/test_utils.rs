//! Reference encoders producing fixtures for decoder tests.

/// Appends the LEB128 encoding of `value` to `target`.
pub fn write_uvarint(mut value: u64, target: &mut Vec<u8>) {
    while value >= 0x80 {
        target.push((value as u8) | 0x80);
        value >>= 7;
    }
    target.push(value as u8);
}

pub fn write_zigzag_varint(value: i64, target: &mut Vec<u8>) {
    write_uvarint(((value << 1) ^ (value >> 63)) as u64, target);
}

pub fn encode_plain(values: &[i64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Packs up to 8 values LSB first into `width` bytes, padding with zeros.
pub fn pack_group(values: &[u64], width: usize, target: &mut Vec<u8>) {
    assert!(values.len() <= 8);
    let start = target.len();
    target.resize(start + width, 0);
    for (i, &value) in values.iter().enumerate() {
        for b in 0..width {
            if (value >> b) & 1 == 1 {
                let bit = i * width + b;
                target[start + bit / 8] |= 1 << (bit % 8);
            }
        }
    }
}

fn bit_width(values: &[u64]) -> usize {
    values
        .iter()
        .map(|v| 64 - v.leading_zeros() as usize)
        .max()
        .unwrap_or(0)
}

/// Encodes `values` with the delta-binary-packed layout. Every miniblock
/// holding at least one delta is padded to its full size.
pub fn encode_delta(values: &[i64], block_size: usize, miniblocks: usize) -> Vec<u8> {
    let miniblock_size = block_size / miniblocks;
    let mut out = Vec::new();
    write_uvarint(block_size as u64, &mut out);
    write_uvarint(miniblocks as u64, &mut out);
    write_uvarint(values.len() as u64, &mut out);
    write_zigzag_varint(values.first().copied().unwrap_or(0), &mut out);

    let deltas: Vec<i64> = values.windows(2).map(|w| w[1].wrapping_sub(w[0])).collect();
    for block in deltas.chunks(block_size) {
        let min_delta = *block.iter().min().unwrap();
        write_zigzag_varint(min_delta, &mut out);

        let adjusted: Vec<u64> = block
            .iter()
            .map(|d| d.wrapping_sub(min_delta) as u64)
            .collect();
        let chunks: Vec<&[u64]> = adjusted.chunks(miniblock_size).collect();
        let widths: Vec<usize> = (0..miniblocks)
            .map(|i| chunks.get(i).map_or(0, |chunk| bit_width(chunk)))
            .collect();
        out.extend(widths.iter().map(|&w| w as u8));

        for (chunk, &width) in chunks.iter().zip(&widths) {
            for group in 0..miniblock_size / 8 {
                let group: Vec<u64> = chunk.iter().skip(group * 8).take(8).copied().collect();
                pack_group(&group, width, &mut out);
            }
        }
    }
    out
}

/// Appends an RLE run of `count` repetitions of `value`.
pub fn rle_run(count: usize, value: u32, bit_width: usize, target: &mut Vec<u8>) {
    write_uvarint((count as u64) << 1, target);
    target.extend_from_slice(&value.to_le_bytes()[..bit_width.div_ceil(8)]);
}

/// Appends a bit-packed run holding `keys`, padded to a multiple of 8.
pub fn bit_packed_run(keys: &[u32], bit_width: usize, target: &mut Vec<u8>) {
    let groups = keys.len().div_ceil(8);
    write_uvarint(((groups as u64) << 1) | 1, target);
    for group in keys.chunks(8) {
        let group: Vec<u64> = group.iter().map(|&k| k as u64).collect();
        pack_group(&group, bit_width, target);
    }
}
