use crate::decoder::Int64Decoder;
use delta_binary_packed::DeltaBinaryPackedDecoder;
use dictionary::DictionaryDecoder;
use pagedec_common::{Result, error::Error};
use plain::PlainDecoder;

pub mod delta_binary_packed;
pub mod dictionary;
pub mod hybrid_rle;
pub mod plain;

#[cfg(test)]
pub(crate) mod test_utils;

/// Page encodings understood by [`new_int64_decoder`], numbered as in the
/// Parquet format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Encoding {
    Plain = 0,
    PlainDictionary = 2,
    DeltaBinaryPacked = 5,
    RleDictionary = 8,
}

impl Encoding {
    pub fn is_dictionary(self) -> bool {
        matches!(self, Encoding::PlainDictionary | Encoding::RleDictionary)
    }
}

impl TryFrom<i32> for Encoding {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Encoding::Plain),
            2 => Ok(Encoding::PlainDictionary),
            5 => Ok(Encoding::DeltaBinaryPacked),
            8 => Ok(Encoding::RleDictionary),
            _ => Err(Error::invalid_arg(
                "encoding",
                format!("unsupported int64 page encoding {value}"),
            )),
        }
    }
}

/// Creates a decoder for one int64 data page.
///
/// `dictionary` is the decoded value table of the column chunk and must be
/// present for dictionary encoded pages; it is ignored otherwise.
pub fn new_int64_decoder<'a>(
    encoding: Encoding,
    page: &'a [u8],
    dictionary: Option<Vec<i64>>,
) -> Result<Box<dyn Int64Decoder + 'a>> {
    log::debug!(
        "creating int64 {encoding:?} decoder for a {} byte page",
        page.len()
    );
    let decoder: Box<dyn Int64Decoder + 'a> = match encoding {
        Encoding::Plain => Box::new(PlainDecoder::new(page)),
        Encoding::DeltaBinaryPacked => Box::new(DeltaBinaryPackedDecoder::try_new(page)?),
        Encoding::PlainDictionary | Encoding::RleDictionary => {
            let values = dictionary.ok_or_else(|| {
                Error::invalid_arg("dictionary", "required for dictionary encoded pages")
            })?;
            Box::new(DictionaryDecoder::with_values(values, page)?)
        }
    };
    Ok(decoder)
}
