//! Error types for mesh decoding.

use thiserror::Error;

/// Result type for mesh decoding operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while decoding a mesh from a byte buffer.
#[derive(Debug, Error)]
pub enum IoError {
    /// The format hint did not match any supported format.
    #[error("unknown mesh format: {hint}")]
    UnknownFormat {
        /// The unrecognized hint (extension or file name).
        hint: String,
    },

    /// Invalid buffer content (parse error).
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// Binary STL buffer too short for its header.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Expected header size.
        expected: usize,
        /// Actual buffer size.
        got: usize,
    },

    /// Binary STL buffer ended before the declared triangle count.
    #[error("invalid face count: expected {expected}, got {got}")]
    InvalidFaceCount {
        /// Declared number of faces.
        expected: u32,
        /// Number of faces actually present.
        got: u32,
    },

    /// The decoded result contains no usable geometry.
    #[error("empty or invalid mesh")]
    EmptyMesh,

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Float parsing error.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// Integer parsing error.
    #[error("integer parsing error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
