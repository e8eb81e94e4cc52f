//! Error types.
//!
//! Every fallible operation in this crate returns [`DawgError`]. Lookups never
//! fail: a missing key is reported as `None`, not as an error.

use std::error::Error;
use std::fmt;

/// Result type with [`DawgError`] as the default error.
pub type Result<T, E = DawgError> = std::result::Result<T, E>;

/// The error type of this crate.
#[derive(Debug, thiserror::Error)]
pub enum DawgError {
    /// The key/value input handed to a build call is unusable.
    ///
    /// See [`InvalidInputError`].
    #[error(transparent)]
    InvalidInput(InvalidInputError),

    /// The encoder could not place the automaton inside the configured bounds.
    ///
    /// See [`BuildError`].
    #[error(transparent)]
    Build(BuildError),

    /// A serialized blob failed a structural check.
    ///
    /// See [`CorruptDataError`].
    #[error(transparent)]
    CorruptData(CorruptDataError),

    /// I/O failure while reading or writing a serialized blob.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DawgError {
    pub(crate) fn invalid_input<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidInput(InvalidInputError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn build<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Build(BuildError { msg: msg.into() })
    }

    pub(crate) fn corrupt_data<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::CorruptData(CorruptDataError { msg: msg.into() })
    }
}

/// Raised when keys are duplicated, key and value counts differ, or the
/// input exceeds what the structure can index.
#[derive(Debug)]
pub struct InvalidInputError {
    /// Name of the offending argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl InvalidInputError {
    /// Name of the offending argument.
    pub fn arg(&self) -> &'static str {
        self.arg
    }
}

impl fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidInputError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidInputError {}

/// Raised when the double array would outgrow the configured capacity.
#[derive(Debug)]
pub struct BuildError {
    pub(crate) msg: String,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BuildError: {}", self.msg)
    }
}

impl Error for BuildError {}

/// Raised when a serialized blob is truncated, fails its checksum, or
/// contains out-of-range offsets.
#[derive(Debug)]
pub struct CorruptDataError {
    pub(crate) msg: String,
}

impl fmt::Display for CorruptDataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CorruptDataError: {}", self.msg)
    }
}

impl Error for CorruptDataError {}
