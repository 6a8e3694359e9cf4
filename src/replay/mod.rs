//! A scripted in-memory transfer for tests, benches, and examples.

use std::io;

use bytes::Bytes;

use crate::transfer::{Transfer, TransferStatus};

/// A [`Transfer`] that replays a fixed sequence of chunks.
///
/// Each multiplex pass delivers the next scripted chunk; once the script is
/// exhausted the transfer reports [`TransferStatus::Done`]. Optionally a
/// failure can be injected in place of completion, to exercise engine-error
/// propagation.
///
/// This is the in-memory stand-in for a real engine-backed transfer: it lets
/// stream behavior be tested against exact chunk boundaries and timings
/// without any network.
///
/// # Example
///
/// ```
/// use std::io::Read;
///
/// use bytes::Bytes;
/// use pullstream::{PullStream, ReplayTransfer};
///
/// let transfer = ReplayTransfer::new(vec![Bytes::from_static(b"response body")]);
/// let mut stream = PullStream::single(transfer);
///
/// let mut body = String::new();
/// stream.read_to_string(&mut body)?;
/// assert_eq!(body, "response body");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReplayTransfer {
    chunks: Vec<Bytes>,
    next: usize,
    fail_at_end: Option<io::ErrorKind>,
}

impl ReplayTransfer {
    /// Creates a transfer that delivers `chunks` one per pass, then finishes.
    pub fn new(chunks: Vec<Bytes>) -> Self {
        Self {
            chunks,
            next: 0,
            fail_at_end: None,
        }
    }

    /// Creates a transfer that delivers `chunks`, then fails with `kind`
    /// instead of finishing.
    pub fn failing_after(chunks: Vec<Bytes>, kind: io::ErrorKind) -> Self {
        Self {
            chunks,
            next: 0,
            fail_at_end: Some(kind),
        }
    }

    /// Number of scripted chunks not yet delivered.
    pub fn chunks_left(&self) -> usize {
        self.chunks.len() - self.next
    }
}

impl Transfer for ReplayTransfer {
    fn perform(&mut self, sink: &mut dyn FnMut(&[u8])) -> io::Result<TransferStatus> {
        if self.next >= self.chunks.len() {
            return match self.fail_at_end.take() {
                Some(kind) => Err(io::Error::new(kind, "scripted transfer failure")),
                None => Ok(TransferStatus::Done),
            };
        }
        sink(&self.chunks[self.next]);
        self.next += 1;
        Ok(TransferStatus::Active)
    }
}
