//! error — crate-wide error type.
//!
//! Four kinds, all surfaced to the caller, none retried internally:
//! - Unsupported: requested (buckets per element, fp rate) pair is outside
//!   the feasible region of the probability table.
//! - OutOfBounds: bit index >= bit length.
//! - ReadOnly: mutation attempted through a read-only bit field.
//! - Io: file open/extend/sync failure, carrying the OS error.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Requested parameters cannot be satisfied by the probability table.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Bit index outside the addressable range of the bit field.
    #[error("bit index {index} out of range 0..{len}")]
    OutOfBounds { index: u64, len: u64 },

    /// Mutation attempted on a bit field opened read-only.
    #[error("bit field is read-only")]
    ReadOnly,

    /// Underlying file or mapping operation failed.
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for invalid-argument conditions that reach the OS layer
    /// (zero-length fields, read-only anonymous maps and the like).
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            msg.into(),
        ))
    }
}
