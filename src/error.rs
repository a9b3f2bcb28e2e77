//! Error type shared by every fallible operation in the crate.

/// Crate-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed dimensions, mismatched lengths, zero-length buffers and the like.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An access reached past the end of a buffer or coordinate space.
    #[error("cannot access {count} element(s) at offset {offset}, length is {len}")]
    IndexOutOfRange {
        offset: usize,
        count: usize,
        len: usize,
    },

    /// The native allocation backing a buffer has already been released.
    #[error("native buffer has been released")]
    Released,

    /// Failure reported by the FFTW bindings.
    #[error(transparent)]
    Fftw(#[from] fftw::error::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

/// Convenience Result type for ezfft operations.
pub type Result<T> = std::result::Result<T, Error>;
