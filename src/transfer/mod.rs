//! The transfer-engine seam - Transfer and TransferSet.
//!
//! This crate never performs network I/O itself. It consumes an external
//! transfer engine through the [`Transfer`] trait: one readiness-based step
//! at a time, with received bytes handed over synchronously through a sink
//! closure. [`TransferSet`] aggregates the in-flight transfers of one stream
//! and runs a single multiplex pass across all of them.

use std::io;

/// Outcome of one readiness pass on a single transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    /// The transfer has more work to do; further passes may deliver data.
    Active,
    /// The transfer finished (successfully or not, as the engine defines it);
    /// it will be dropped from its set and never polled again.
    Done,
}

/// One in-flight transfer driven by an external engine.
///
/// Implementations wrap whatever the engine hands out for a single download:
/// a socket plus protocol state, a handle into a multiplexed connection, or a
/// scripted fake such as [`ReplayTransfer`](crate::ReplayTransfer).
///
/// # Example
///
/// ```
/// use pullstream::{Transfer, TransferStatus};
///
/// /// Delivers one fixed payload, then finishes.
/// struct OneShot(Option<Vec<u8>>);
///
/// impl Transfer for OneShot {
///     fn perform(
///         &mut self,
///         sink: &mut dyn FnMut(&[u8]),
///     ) -> std::io::Result<TransferStatus> {
///         match self.0.take() {
///             Some(payload) => {
///                 sink(&payload);
///                 Ok(TransferStatus::Active)
///             }
///             None => Ok(TransferStatus::Done),
///         }
///     }
/// }
/// ```
pub trait Transfer {
    /// Runs one readiness-based I/O pass on this transfer.
    ///
    /// The pass may block up to the engine's own internal timeout; no
    /// cancellation is threaded through this layer. Every chunk received
    /// during the pass must be delivered to `sink` synchronously, before
    /// this method returns, in arrival order.
    ///
    /// # Errors
    ///
    /// Engine failures (network errors, protocol errors) surface here and
    /// propagate to the blocked reader unmodified.
    fn perform(&mut self, sink: &mut dyn FnMut(&[u8])) -> io::Result<TransferStatus>;
}

/// The set of in-flight transfers feeding one stream.
///
/// A `TransferSet` is exclusively owned by the [`PullStream`](crate::PullStream)
/// it is handed to. Finished transfers are dropped as soon as they report
/// [`TransferStatus::Done`]; releasing the set drops every remaining member,
/// and each member's own `Drop` frees its engine resources.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use pullstream::{ReplayTransfer, TransferSet};
///
/// let mut set = TransferSet::new();
/// set.add(ReplayTransfer::new(vec![Bytes::from_static(b"hello")]));
/// assert_eq!(set.remaining(), 1);
/// ```
pub struct TransferSet<T> {
    members: Vec<T>,
}

impl<T> TransferSet<T> {
    /// Creates an empty set.
    ///
    /// An empty set is valid: a stream over it is immediately at
    /// end-of-stream.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Creates a set containing a single transfer.
    pub fn single(transfer: T) -> Self {
        Self {
            members: vec![transfer],
        }
    }

    /// Adds a transfer to the set.
    pub fn add(&mut self, transfer: T) {
        self.members.push(transfer);
    }

    /// Number of transfers not yet finished.
    pub fn remaining(&self) -> usize {
        self.members.len()
    }

    /// Drops every member, releasing their engine resources. Idempotent.
    pub fn release(&mut self) {
        self.members.clear();
    }
}

impl<T: Transfer> TransferSet<T> {
    /// Runs one multiplex pass: services every active member once, delivering
    /// received chunks to `sink`, and drops members that report `Done`.
    ///
    /// An engine error aborts the pass; members already serviced keep the
    /// data they delivered, the failing member stays in the set.
    pub(crate) fn perform(&mut self, sink: &mut dyn FnMut(&[u8])) -> io::Result<()> {
        let mut i = 0;
        while i < self.members.len() {
            match self.members[i].perform(sink)? {
                TransferStatus::Active => i += 1,
                TransferStatus::Done => {
                    self.members.remove(i);
                }
            }
        }
        Ok(())
    }
}

impl<T> Default for TransferSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for TransferSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}
