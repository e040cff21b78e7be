//! Error types for mddocx.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mddocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that stop a conversion.
///
/// Anomalies inside the Markdown itself (unbalanced markers, unsupported
/// blocks, ragged tables) are never reported here.
#[derive(Error, Debug)]
pub enum Error {
    /// The input text was empty.
    #[error("No text provided")]
    InvalidInput,

    /// Building the document package failed. The cause is available through
    /// `source()` but is kept out of the message shown to callers.
    #[error("Failed to convert document")]
    Conversion(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// I/O error when reading input or writing output files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read config file at {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse config file at {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Error {
    pub(crate) fn conversion<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Conversion(Box::new(err))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::conversion(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::InvalidInput.to_string(), "No text provided");
    }

    #[test]
    fn test_conversion_hides_cause() {
        let cause = io::Error::other("disk on fire");
        let err = Error::conversion(cause);
        assert_eq!(err.to_string(), "Failed to convert document");
        assert_eq!(err.source().unwrap().to_string(), "disk on fire");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
