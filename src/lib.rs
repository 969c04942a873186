mod error;

#[cfg(feature = "rand")]
pub mod rand;

pub use error::{Error, Result};

/// Ceiling on tower height. `2^33` comfortably exceeds any element count a
/// single list will hold.
pub const MAX_LEVELS: usize = 33;
