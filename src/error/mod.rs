//! Error types for pullstream.

use std::fmt;

/// Errors that can occur while reading from a pull stream.
#[derive(Debug)]
pub enum StreamError {
    /// The transfer engine reported a failure during a multiplex pass.
    ///
    /// Engine errors are propagated unmodified; this crate never retries.
    Io(std::io::Error),

    /// The requested offset/count does not fit in the destination buffer.
    OutOfRange {
        /// The requested destination offset.
        offset: usize,
        /// The requested byte count.
        count: usize,
        /// The actual destination length.
        len: usize,
    },

    /// The stream was used after its transfer set had been released.
    Disposed,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Io(e) => write!(f, "transfer engine error: {}", e),
            StreamError::OutOfRange { offset, count, len } => {
                write!(
                    f,
                    "read out of range: offset {} + count {} exceeds destination length {}",
                    offset, count, len
                )
            }
            StreamError::Disposed => {
                write!(f, "stream disposed: transfer set already released")
            }
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StreamError {
    fn from(e: std::io::Error) -> Self {
        StreamError::Io(e)
    }
}

impl From<StreamError> for std::io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Io(e) => e,
            StreamError::OutOfRange { .. } => {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
            }
            StreamError::Disposed => std::io::Error::new(std::io::ErrorKind::NotConnected, e),
        }
    }
}
