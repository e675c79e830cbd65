use num_traits::AsPrimitive;
use pagedec_common::Result;

/// Dynamically typed destination slot.
///
/// Used by callers which drive a column scan without statically knowing the
/// element type of the column.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnyValue {
    #[default]
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(String),
}

impl AnyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AnyValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AnyValue::I64(v) => Some(*v),
            AnyValue::U64(v) if *v <= i64::MAX as u64 => Some(*v as i64),
            _ => None,
        }
    }
}

impl From<i64> for AnyValue {
    fn from(value: i64) -> Self {
        AnyValue::I64(value)
    }
}

/// Page decoder producing 64-bit signed integers.
///
/// A decoder is built from one page's payload and called repeatedly until
/// the page is exhausted. Each call advances the decoder by exactly the
/// number of values it returns.
pub trait Int64Decoder {
    /// Decodes up to `dst.len()` values into `dst`.
    ///
    /// Returns the number of values written. Fewer values than requested
    /// signals the end of a stream whose length is known to the decoder.
    /// An empty `dst` is a no-op.
    fn decode_i64(&mut self, dst: &mut [i64]) -> Result<usize>;

    /// Decodes into dynamically typed slots.
    ///
    /// Values are decoded into a zeroed temporary buffer first. On success
    /// the decoded prefix is copied into `dst`. On error the whole temporary
    /// buffer is copied, so the values consumed before the failure still
    /// reach the caller, and the decoder's error is returned as is.
    fn decode_any(&mut self, dst: &mut [AnyValue]) -> Result<usize> {
        let mut values = vec![0i64; dst.len()];
        let result = self.decode_i64(&mut values);
        let filled = filled_len(&result, values.len());
        for (slot, &value) in dst.iter_mut().zip(&values[..filled]) {
            *slot = AnyValue::I64(value);
        }
        result
    }
}

impl<D: Int64Decoder + ?Sized> Int64Decoder for Box<D> {
    fn decode_i64(&mut self, dst: &mut [i64]) -> Result<usize> {
        (**self).decode_i64(dst)
    }

    fn decode_any(&mut self, dst: &mut [AnyValue]) -> Result<usize> {
        (**self).decode_any(dst)
    }
}

/// Generic numeric destinations for any [`Int64Decoder`].
pub trait Int64DecoderExt: Int64Decoder {
    /// Decodes into a buffer of any primitive numeric type, converting each
    /// value with `as` semantics.
    ///
    /// Copies into `dst` the same way as [`Int64Decoder::decode_any`].
    fn decode_as<T>(&mut self, dst: &mut [T]) -> Result<usize>
    where
        T: Copy + 'static,
        i64: AsPrimitive<T>,
    {
        let mut values = vec![0i64; dst.len()];
        let result = self.decode_i64(&mut values);
        let filled = filled_len(&result, values.len());
        for (slot, &value) in dst.iter_mut().zip(&values[..filled]) {
            *slot = value.as_();
        }
        result
    }
}

/// Number of temporary slots to copy out after a `decode_i64` call.
#[inline]
fn filled_len(result: &Result<usize>, len: usize) -> usize {
    match result {
        Ok(count) => *count,
        Err(_) => len,
    }
}

impl<D: Int64Decoder + ?Sized> Int64DecoderExt for D {}

#[cfg(test)]
mod tests {
    use super::{AnyValue, Int64Decoder, Int64DecoderExt};
    use pagedec_common::{Result, error::Error};

    /// Produces `0, 1, 2, ...` up to `len`. With `fail` set, a request for
    /// more than the remaining values writes what is left and then fails.
    struct Counter {
        next: i64,
        len: i64,
        fail: bool,
    }

    impl Int64Decoder for Counter {
        fn decode_i64(&mut self, dst: &mut [i64]) -> Result<usize> {
            let count = dst.len().min((self.len - self.next) as usize);
            for slot in &mut dst[..count] {
                *slot = self.next;
                self.next += 1;
            }
            if self.fail && count < dst.len() {
                return Err(Error::truncated("counter"));
            }
            Ok(count)
        }
    }

    #[test]
    fn test_decode_any() {
        let mut decoder = Counter {
            next: 0,
            len: 3,
            fail: false,
        };
        let mut dst = vec![AnyValue::Null; 4];
        assert_eq!(decoder.decode_any(&mut dst).unwrap(), 3);
        assert_eq!(
            dst,
            vec![
                AnyValue::I64(0),
                AnyValue::I64(1),
                AnyValue::I64(2),
                AnyValue::Null
            ]
        );
    }

    #[test]
    fn test_decode_any_delivers_values_before_error() {
        let mut decoder = Counter {
            next: 0,
            len: 2,
            fail: true,
        };
        let mut dst = vec![AnyValue::Bool(true); 3];
        let err = decoder.decode_any(&mut dst).unwrap_err();
        assert!(err.is_end_of_data());
        assert_eq!(
            dst,
            vec![AnyValue::I64(0), AnyValue::I64(1), AnyValue::I64(0)]
        );
    }

    #[test]
    fn test_decode_as_delivers_values_before_error() {
        let mut decoder = Counter {
            next: 5,
            len: 6,
            fail: true,
        };
        let mut dst = [9u16; 2];
        assert!(decoder.decode_as(&mut dst).is_err());
        assert_eq!(dst, [5, 0]);
    }

    #[test]
    fn test_decode_as() {
        let mut decoder: Box<dyn Int64Decoder> = Box::new(Counter {
            next: 254,
            len: 258,
            fail: false,
        });
        let mut dst = [0u8; 4];
        assert_eq!(decoder.decode_as(&mut dst).unwrap(), 4);
        assert_eq!(dst, [254, 255, 0, 1]);
    }

    #[test]
    fn test_any_value_as_i64() {
        assert_eq!(AnyValue::from(-3).as_i64(), Some(-3));
        assert_eq!(AnyValue::U64(u64::MAX).as_i64(), None);
        assert_eq!(AnyValue::String("1".to_string()).as_i64(), None);
        assert!(AnyValue::default().is_null());
    }
}
