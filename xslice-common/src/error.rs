use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("alignment {0} not supported")]
    UnsupportedAlignment(usize),
    #[error("allocation of {0} bytes overflows")]
    AllocOverflow(usize),
}
