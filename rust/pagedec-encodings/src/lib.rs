//! Decoders turning one column page's encoded payload into 64-bit integers.
//!
//! Three page encodings are supported: plain, dictionary (RLE/bit-packed
//! hybrid keys into a value table) and delta-binary-packed. Every decoder
//! implements [`decoder::Int64Decoder`] and is driven by repeated batch
//! calls until the page is exhausted.

pub mod buffer;
pub mod decoder;
pub mod encodings;

pub use decoder::{AnyValue, Int64Decoder, Int64DecoderExt};
pub use encodings::{
    Encoding, delta_binary_packed::DeltaBinaryPackedDecoder,
    delta_binary_packed::DeltaDecoderOptions, dictionary::DictionaryDecoder,
    hybrid_rle::HybridRleDecoder, hybrid_rle::KeyDecoder, new_int64_decoder,
    plain::PlainDecoder,
};
