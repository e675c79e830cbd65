use super::{
    hybrid_rle::{HybridRleDecoder, KeyDecoder},
    plain::decode_plain_values,
};
use crate::decoder::Int64Decoder;
use pagedec_common::{Result, error::Error};

/// Decoder for dictionary encoded pages.
///
/// Keys produced by the key decoder index into a value table materialized
/// once from the plain encoded dictionary page.
pub struct DictionaryDecoder<K> {
    values: Vec<i64>,
    keys: K,
}

impl<'a> DictionaryDecoder<HybridRleDecoder<'a>> {
    /// Builds the value table from `count` plain values in `dict_page` and
    /// reads keys from `indices_page` (key bit width byte followed by the
    /// hybrid RLE stream).
    pub fn try_new(dict_page: &[u8], count: usize, indices_page: &'a [u8]) -> Result<Self> {
        let values = decode_plain_values(dict_page, count)?;
        Self::with_values(values, indices_page)
    }

    /// Uses an already decoded value table.
    pub fn with_values(values: Vec<i64>, indices_page: &'a [u8]) -> Result<Self> {
        let keys = HybridRleDecoder::from_indices_page(indices_page)?;
        Ok(Self::with_key_decoder(values, keys))
    }
}

impl<K: KeyDecoder> DictionaryDecoder<K> {
    pub fn with_key_decoder(values: Vec<i64>, keys: K) -> Self {
        Self { values, keys }
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

impl<K: KeyDecoder> Int64Decoder for DictionaryDecoder<K> {
    fn decode_i64(&mut self, dst: &mut [i64]) -> Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }
        let keys = self.keys.decode_keys(dst.len())?;
        for (slot, &key) in dst.iter_mut().zip(keys) {
            *slot = *self
                .values
                .get(key as usize)
                .ok_or_else(|| Error::index_out_of_range(key as u64, self.values.len()))?;
        }
        Ok(keys.len())
    }
}
