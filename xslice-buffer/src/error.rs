use thiserror::Error;
use xslice_common::error::Error as CommonError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("index out of range: index {index}, length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("slice bounds out of range: [{lo}:{hi}:{max}] with capacity {cap}")]
    SliceOutOfRange {
        lo: usize,
        hi: usize,
        max: usize,
        cap: usize,
    },
    #[error("capacity {cap} less than length {len}")]
    CapacityLessThanLength { len: usize, cap: usize },
    #[error("type mismatch: expect {expected} elements, got {actual}")]
    TypeMismatch { expected: usize, actual: usize },
    #[error("capacity overflow")]
    CapacityOverflow,
    #[error("alignment {0} not supported")]
    UnsupportedAlignment(usize),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns whether the error is an index or slice bound violation.
    #[inline]
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Error::IndexOutOfRange { .. } | Error::SliceOutOfRange { .. }
        )
    }
}

impl From<CommonError> for Error {
    #[inline]
    fn from(src: CommonError) -> Self {
        match src {
            CommonError::InvalidFormat(s) => Error::InvalidFormat(s),
            CommonError::UnsupportedAlignment(align) => Error::UnsupportedAlignment(align),
            CommonError::AllocOverflow(_) => Error::CapacityOverflow,
        }
    }
}
