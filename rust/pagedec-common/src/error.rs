use thiserror::Error;

/// Decoding error.
///
/// The kind is boxed so that `Result<T>` stays pointer-sized on the hot
/// decode paths.
#[derive(Debug, Clone, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn truncated(element: impl Into<String>) -> Error {
        Error(
            ErrorKind::Truncated {
                element: element.into(),
            }
            .into(),
        )
    }

    pub fn malformed_varint(element: impl Into<String>) -> Error {
        Error(
            ErrorKind::MalformedVarint {
                element: element.into(),
            }
            .into(),
        )
    }

    pub fn no_more_data() -> Error {
        Error(ErrorKind::NoMoreData.into())
    }

    pub fn index_out_of_range(index: u64, len: usize) -> Error {
        Error(ErrorKind::IndexOutOfRange { index, len }.into())
    }

    pub fn invalid_format(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    /// Returns `true` for errors caused by running out of input, as opposed
    /// to input that is present but corrupt.
    pub fn is_end_of_data(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Truncated { .. } | ErrorKind::NoMoreData
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("buffer ended while reading {element}")]
    Truncated { element: String },

    #[error("malformed varint in {element}")]
    MalformedVarint { element: String },

    #[error("no more data")]
    NoMoreData,

    #[error("dictionary index {index} is out of range for {len} values")]
    IndexOutOfRange { index: u64, len: usize },

    #[error("invalid encoded format for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
