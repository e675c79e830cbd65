//! Stateless bit-level primitives used by the page decoders: LEB128 varints,
//! zig-zag varints and the width-indexed 8-value bit unpacker.

pub mod bitpacking;
pub mod varint;
