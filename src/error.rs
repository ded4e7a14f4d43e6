use std::path::PathBuf;
use thiserror::Error;

/// Failure while decoding a fixed-width record from its wire bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated {record}: expected {expected} bytes, got {actual}")]
    Truncated {
        record: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("trailing bytes after {record}: expected {expected} bytes, got {actual}")]
    TrailingBytes {
        record: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output directory already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Toml(_) | Self::OutputExists(_) | Self::InputNotFound(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_message_names_lengths() {
        let err = DecodeError::Truncated {
            record: "DegreeRecord",
            expected: 8,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "truncated DegreeRecord: expected 8 bytes, got 3"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::Config("bad".into()).exit_code(), 2);
        assert_eq!(Error::OutputExists(PathBuf::from("out")).exit_code(), 2);
        assert_eq!(Error::InvalidInput("x".into()).exit_code(), 1);
        let decode = Error::from(DecodeError::Truncated {
            record: "count",
            expected: 4,
            actual: 0,
        });
        assert_eq!(decode.exit_code(), 1);
    }
}
