use thiserror::Error;

/// Errors raised on caller misuse. Absent or duplicate keys are not errors,
/// they are reported through `bool` and `Option` returns instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("index {index} out of range for skip list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cursor has no current element to remove")]
    NoCurrentElement,

    #[error("invalid max levels {0} (expected 1..={})", crate::MAX_LEVELS)]
    InvalidMaxLevels(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
