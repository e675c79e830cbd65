use crate::{buffer::EncodedBuffer, decoder::Int64Decoder};
use pagedec_common::{Result, error::Error};

const VALUE_SIZE: usize = std::mem::size_of::<i64>();

/// Decoder for plain encoded pages: densely packed 8-byte little-endian
/// two's-complement values.
///
/// The decoder has no notion of a declared value count. Asking for a value
/// once the buffer is consumed fails with `NoMoreData`, and a partial value
/// at the end of the buffer fails with `Truncated`.
#[derive(Debug, Clone)]
pub struct PlainDecoder<'a> {
    buffer: EncodedBuffer<'a>,
}

impl<'a> PlainDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            buffer: EncodedBuffer::new(data),
        }
    }

    /// Number of whole values left in the buffer.
    pub fn remaining(&self) -> usize {
        self.buffer.remaining() / VALUE_SIZE
    }

    pub fn offset(&self) -> usize {
        self.buffer.offset()
    }

    /// Skips `count` values. Nothing is consumed if fewer are available.
    pub fn skip_values(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        if self.buffer.is_exhausted() {
            return Err(Error::no_more_data());
        }
        let len = count
            .checked_mul(VALUE_SIZE)
            .ok_or_else(|| Error::invalid_arg("count", "skip length overflows"))?;
        self.buffer.advance(len, "plain value")
    }

    #[inline]
    fn next_value(&mut self) -> Result<i64> {
        if self.buffer.is_exhausted() {
            return Err(Error::no_more_data());
        }
        self.buffer.read_i64_le("plain value")
    }
}

impl Int64Decoder for PlainDecoder<'_> {
    fn decode_i64(&mut self, dst: &mut [i64]) -> Result<usize> {
        for slot in dst.iter_mut() {
            *slot = self.next_value()?;
        }
        Ok(dst.len())
    }
}

/// Decodes exactly `count` plain values, as stored in a dictionary page.
pub fn decode_plain_values(data: &[u8], count: usize) -> Result<Vec<i64>> {
    let len = count
        .checked_mul(VALUE_SIZE)
        .ok_or_else(|| Error::invalid_arg("count", "dictionary size overflows"))?;
    if data.len() < len {
        return Err(Error::truncated("dictionary page"));
    }
    let mut values = vec![0i64; count];
    PlainDecoder::new(data).decode_i64(&mut values)?;
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::{PlainDecoder, decode_plain_values};
    use crate::{
        decoder::{AnyValue, Int64Decoder},
        encodings::test_utils::encode_plain,
    };
    use pagedec_common::error::ErrorKind;

    #[test]
    fn test_round_trip() {
        let data: Vec<i64> = (0..65536).map(|_| fastrand::i64(..)).collect();
        let encoded = encode_plain(&data);

        let mut decoder = PlainDecoder::new(&encoded);
        assert_eq!(decoder.remaining(), data.len());
        let mut decoded = vec![0i64; data.len()];
        let mut filled = 0;
        while filled < decoded.len() {
            let batch = fastrand::usize(1..=1000).min(decoded.len() - filled);
            let count = decoder
                .decode_i64(&mut decoded[filled..filled + batch])
                .unwrap();
            assert_eq!(count, batch);
            filled += count;
        }
        assert_eq!(decoded, data);
        assert_eq!(decoder.remaining(), 0);
    }

    #[test]
    fn test_single_value_then_exhausted() {
        let encoded = [0x01, 0, 0, 0, 0, 0, 0, 0];
        let mut decoder = PlainDecoder::new(&encoded);
        let mut dst = [0i64; 1];
        assert_eq!(decoder.decode_i64(&mut dst).unwrap(), 1);
        assert_eq!(dst, [1]);

        let err = decoder.decode_i64(&mut dst).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NoMoreData);
        assert_eq!(dst, [1]);
    }

    #[test]
    fn test_negative_values() {
        let encoded = encode_plain(&[-1, i64::MIN, i64::MAX]);
        let mut decoder = PlainDecoder::new(&encoded);
        let mut dst = [0i64; 3];
        decoder.decode_i64(&mut dst).unwrap();
        assert_eq!(dst, [-1, i64::MIN, i64::MAX]);
    }

    #[test]
    fn test_truncated_value() {
        let mut encoded = encode_plain(&[7]);
        encoded.extend_from_slice(&[1, 2, 3]);
        let mut decoder = PlainDecoder::new(&encoded);
        let mut dst = [0i64; 2];
        let err = decoder.decode_i64(&mut dst).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Truncated { .. }));
        // The complete value before the partial one was still decoded.
        assert_eq!(dst[0], 7);
        assert_eq!(decoder.offset(), 8);
    }

    #[test]
    fn test_empty_destination() {
        let mut decoder = PlainDecoder::new(&[]);
        assert_eq!(decoder.decode_i64(&mut []).unwrap(), 0);
    }

    #[test]
    fn test_skip() {
        let encoded = encode_plain(&[1, 2, 3, 4]);
        let mut decoder = PlainDecoder::new(&encoded);
        decoder.skip_values(2).unwrap();
        assert!(decoder.skip_values(3).is_err());
        assert_eq!(decoder.remaining(), 2);
        let mut dst = [AnyValue::Null, AnyValue::Null];
        assert_eq!(decoder.decode_any(&mut dst).unwrap(), 2);
        assert_eq!(dst, [AnyValue::I64(3), AnyValue::I64(4)]);
        assert_eq!(decoder.skip_values(1).unwrap_err().kind(), &ErrorKind::NoMoreData);
    }

    #[test]
    fn test_decode_any_keeps_values_before_truncation() {
        let mut encoded = encode_plain(&[7]);
        encoded.extend_from_slice(&[1, 2, 3]);
        let mut decoder = PlainDecoder::new(&encoded);
        let mut dst = [AnyValue::Null, AnyValue::Null];
        let err = decoder.decode_any(&mut dst).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Truncated { .. }));
        assert_eq!(dst[0], AnyValue::I64(7));
        assert_eq!(decoder.offset(), 8);
    }

    #[test]
    fn test_decode_plain_values() {
        let encoded = encode_plain(&[10, 20, 30]);
        assert_eq!(decode_plain_values(&encoded, 3).unwrap(), vec![10, 20, 30]);
        assert_eq!(decode_plain_values(&encoded, 2).unwrap(), vec![10, 20]);
        assert!(decode_plain_values(&encoded, 0).unwrap().is_empty());
        assert!(matches!(
            decode_plain_values(&encoded, 4).unwrap_err().kind(),
            ErrorKind::Truncated { .. }
        ));
    }
}
