//! Core stream type - PullStream.
//!
//! This module implements the blocking pull-based read adapter. A
//! [`PullStream`] owns a [`TransferSet`] and a pending-byte buffer; every
//! `read` serves buffered bytes if any exist and otherwise drives the
//! engine's multiplex pass until a chunk arrives or every transfer finishes.
//!
//! Progress is made only on the caller's thread: there is no background
//! thread, and the chunk-arrival path runs only as a synchronous consequence
//! of a read driving the engine. The stream must be owned by a single reader
//! at a time.

use std::io::Read;

use crate::buffer::PendingBuffer;
use crate::error::StreamError;
use crate::transfer::{Transfer, TransferSet};

/// A blocking, forward-only byte stream fed by a transfer engine.
///
/// `PullStream` accumulates chunks the engine delivers during multiplex
/// passes and hands them out through plain `read` calls. Once every transfer
/// in the set has finished and the buffer is drained, reads return 0.
///
/// The stream is forward-only: it implements [`std::io::Read`] and nothing
/// else. There is no seeking, writing, or truncation.
///
/// # Example
///
/// ```
/// use std::io::Read;
///
/// use bytes::Bytes;
/// use pullstream::{PullStream, ReplayTransfer};
///
/// let transfer = ReplayTransfer::new(vec![
///     Bytes::from_static(b"abc"),
///     Bytes::from_static(b"defgh"),
/// ]);
///
/// let mut stream = PullStream::single(transfer);
/// let mut body = Vec::new();
/// stream.read_to_end(&mut body)?;
///
/// assert_eq!(body, b"abcdefgh");
/// assert_eq!(stream.len(), 8);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct PullStream<T> {
    /// `None` once disposed; every operation checks this first.
    transfers: Option<TransferSet<T>>,
    pending: PendingBuffer,
    length: u64,
    position: u64,
    have_data: bool,
}

impl<T: Transfer> PullStream<T> {
    /// Creates a stream over a transfer set.
    ///
    /// The stream takes exclusive ownership of the set and releases it on
    /// [`dispose`](PullStream::dispose) or drop. An empty set is valid; the
    /// first read on it returns 0 without blocking.
    pub fn new(transfers: TransferSet<T>) -> Self {
        Self {
            transfers: Some(transfers),
            pending: PendingBuffer::new(),
            length: 0,
            position: 0,
            have_data: false,
        }
    }

    /// Creates a stream over a single transfer, wrapping it in a fresh
    /// single-member set.
    pub fn single(transfer: T) -> Self {
        Self::new(TransferSet::single(transfer))
    }

    /// Reads up to `count` bytes into `dest` starting at `offset`.
    ///
    /// Blocks the calling thread, repeatedly running the transfer set's
    /// multiplex pass, until at least one byte is buffered or every transfer
    /// has finished. Returns the number of bytes read; 0 means end of
    /// stream.
    ///
    /// # Errors
    ///
    /// - [`StreamError::OutOfRange`] if `offset + count` overflows or
    ///   exceeds `dest.len()`, regardless of transfer state.
    /// - [`StreamError::Disposed`] if the stream has been disposed.
    /// - [`StreamError::Io`] if the engine fails during a pass; the error is
    ///   propagated unmodified.
    pub fn read_at(
        &mut self,
        dest: &mut [u8],
        offset: usize,
        count: usize,
    ) -> Result<usize, StreamError> {
        let out_of_range = || StreamError::OutOfRange {
            offset,
            count,
            len: dest.len(),
        };
        let end = offset.checked_add(count).ok_or_else(out_of_range)?;
        if end > dest.len() {
            return Err(out_of_range());
        }

        let Some(transfers) = self.transfers.as_mut() else {
            return Err(StreamError::Disposed);
        };

        // Suspension point: block here until the first chunk arrives, or
        // until new data arrives after a drain, or until the set reports no
        // active transfers left.
        let pending = &mut self.pending;
        let length = &mut self.length;
        let have_data = &mut self.have_data;
        while transfers.remaining() > 0 && (!*have_data || pending.is_empty()) {
            transfers.perform(&mut |chunk| {
                pending.append(chunk);
                *length += chunk.len() as u64;
                *have_data = true;
            })?;
        }

        let n = pending.take_into(&mut dest[offset..end]);
        self.position += n as u64;
        Ok(n)
    }

    /// Total bytes the engine has delivered so far.
    ///
    /// This is a live, growing value, not a content length: it keeps
    /// increasing as chunks arrive and is only final once a read has
    /// returned 0.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.length
    }

    /// Bytes delivered to the caller so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns true if the stream has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.transfers.is_none()
    }

    /// Releases the transfer set, tearing down every underlying transfer.
    ///
    /// Idempotent; a second call is a no-op. Any bytes still buffered become
    /// inaccessible. All further reads fail with [`StreamError::Disposed`].
    pub fn dispose(&mut self) {
        if let Some(mut transfers) = self.transfers.take() {
            transfers.release();
        }
    }
}

impl<T: Transfer> Read for PullStream<T> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let count = buf.len();
        self.read_at(buf, 0, count).map_err(Into::into)
    }
}

impl<T> Drop for PullStream<T> {
    fn drop(&mut self) {
        if let Some(mut transfers) = self.transfers.take() {
            transfers.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::TransferStatus;
    use std::io;

    /// One pass delivers one queued chunk; after the queue drains the
    /// transfer reports Done.
    struct Feed {
        chunks: Vec<Vec<u8>>,
        next: usize,
    }

    impl Feed {
        fn new(chunks: Vec<Vec<u8>>) -> Self {
            Self { chunks, next: 0 }
        }
    }

    impl Transfer for Feed {
        fn perform(&mut self, sink: &mut dyn FnMut(&[u8])) -> io::Result<TransferStatus> {
            if self.next >= self.chunks.len() {
                return Ok(TransferStatus::Done);
            }
            sink(&self.chunks[self.next]);
            self.next += 1;
            Ok(TransferStatus::Active)
        }
    }

    #[test]
    fn test_read_serves_buffered_then_eof() {
        let mut stream = PullStream::single(Feed::new(vec![b"abc".to_vec(), b"defgh".to_vec()]));

        let mut dest = [0u8; 2];
        let n = stream.read_at(&mut dest, 0, 2).unwrap();
        assert_eq!(n, 2);
        assert_eq!(&dest, b"ab");

        let mut rest = Vec::new();
        stream.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"cdefgh");

        let mut dest = [0u8; 4];
        assert_eq!(stream.read_at(&mut dest, 0, 4).unwrap(), 0);
    }

    #[test]
    fn test_accounting_invariant_holds_between_reads() {
        let mut stream = PullStream::single(Feed::new(vec![
            vec![1u8; 7],
            vec![2u8; 13],
            vec![3u8; 3],
        ]));

        let mut dest = [0u8; 5];
        loop {
            let n = stream.read_at(&mut dest, 0, 5).unwrap();
            assert_eq!(
                stream.len() - stream.position(),
                stream.pending.len() as u64
            );
            if n == 0 {
                break;
            }
        }
        assert_eq!(stream.len(), 23);
        assert_eq!(stream.position(), 23);
    }

    #[test]
    fn test_empty_set_reads_zero_without_blocking() {
        let mut stream: PullStream<Feed> = PullStream::new(TransferSet::new());
        let mut dest = [0u8; 100];
        assert_eq!(stream.read_at(&mut dest, 0, 100).unwrap(), 0);
        assert_eq!(stream.len(), 0);
    }

    #[test]
    fn test_out_of_range_offset_and_count() {
        let mut stream = PullStream::single(Feed::new(vec![b"data".to_vec()]));

        let mut dest = [0u8; 5];
        let err = stream.read_at(&mut dest, 5, 5).unwrap_err();
        assert!(matches!(err, StreamError::OutOfRange { .. }));

        // Overflowing offset + count is out of range, not a panic
        let err = stream.read_at(&mut dest, usize::MAX, 2).unwrap_err();
        assert!(matches!(err, StreamError::OutOfRange { .. }));

        // Validation happens before any engine work
        assert_eq!(stream.len(), 0);
    }

    #[test]
    fn test_read_into_middle_of_dest() {
        let mut stream = PullStream::single(Feed::new(vec![b"xy".to_vec()]));
        let mut dest = [0u8; 6];
        let n = stream.read_at(&mut dest, 3, 2).unwrap();
        assert_eq!(n, 2);
        assert_eq!(&dest, &[0, 0, 0, b'x', b'y', 0]);
    }

    #[test]
    fn test_dispose_is_idempotent_and_fatal_to_reads() {
        let mut stream = PullStream::single(Feed::new(vec![b"unread".to_vec()]));
        stream.dispose();
        assert!(stream.is_disposed());
        stream.dispose();

        let mut dest = [0u8; 4];
        let err = stream.read_at(&mut dest, 0, 4).unwrap_err();
        assert!(matches!(err, StreamError::Disposed));
    }

    #[test]
    fn test_engine_error_propagates_unmodified() {
        struct Broken;
        impl Transfer for Broken {
            fn perform(&mut self, _sink: &mut dyn FnMut(&[u8])) -> io::Result<TransferStatus> {
                Err(io::Error::new(io::ErrorKind::TimedOut, "stalled"))
            }
        }

        let mut stream = PullStream::single(Broken);
        let mut dest = [0u8; 8];
        match stream.read_at(&mut dest, 0, 8) {
            Err(StreamError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::TimedOut),
            other => panic!("expected engine error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_io_read_impl() {
        let mut stream = PullStream::single(Feed::new(vec![b"hello ".to_vec(), b"world".to_vec()]));
        let mut body = String::new();
        stream.read_to_string(&mut body).unwrap();
        assert_eq!(body, "hello world");
    }

    #[test]
    fn test_length_stable_after_eof() {
        let mut stream = PullStream::single(Feed::new(vec![b"12345".to_vec()]));
        let mut body = Vec::new();
        stream.read_to_end(&mut body).unwrap();

        assert_eq!(stream.len(), 5);
        let mut dest = [0u8; 1];
        stream.read_at(&mut dest, 0, 1).unwrap();
        assert_eq!(stream.len(), 5);
    }
}
