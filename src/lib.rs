//! pullstream
//!
//! Blocking pull-based reads over a poll-driven transfer engine.
//!
//! A transfer engine delivers data in arbitrarily sized, arbitrarily timed
//! chunks as it multiplexes one or more in-flight transfers. `pullstream`
//! adapts that model to ordinary sequential reads: a [`PullStream`] buffers
//! whatever the engine has delivered and, when a caller asks for bytes that
//! are not there yet, drives the engine's multiplex pass on the caller's own
//! thread until data arrives or every transfer finishes.
//!
//! The crate intentionally:
//! - does NOT perform network I/O (the engine behind [`Transfer`] does)
//! - does NOT spawn threads (progress happens only inside `read`)
//! - does NOT support seeking or writing (the stream is forward-only)
//! - does NOT expose cancellation (pass duration is the engine's policy)
//!
//! It only does one thing: **engine chunks in → blocking `read` out**
//!
//! # Reading a transfer
//!
//! ```
//! use std::io::Read;
//!
//! use bytes::Bytes;
//! use pullstream::{PullStream, ReplayTransfer};
//!
//! let transfer = ReplayTransfer::new(vec![
//!     Bytes::from_static(b"hello "),
//!     Bytes::from_static(b"world"),
//! ]);
//!
//! let mut stream = PullStream::single(transfer);
//!
//! let mut body = String::new();
//! stream.read_to_string(&mut body)?;
//! assert_eq!(body, "hello world");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Plugging in an engine
//!
//! Implement [`Transfer`] for whatever drives one in-flight transfer: each
//! call to [`Transfer::perform`] runs one readiness-based I/O pass (blocking
//! up to the engine's internal timeout), hands every received chunk to the
//! sink synchronously, and reports whether the transfer is still active.
//! Aggregate transfers with [`TransferSet`] and hand the set to
//! [`PullStream::new`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod replay;
mod stream;
mod transfer;

mod buffer; // internal (growth + compaction)

//
// Public surface (intentionally tiny)
//

pub use error::StreamError;
pub use replay::ReplayTransfer;
pub use stream::PullStream;
pub use transfer::{Transfer, TransferSet, TransferStatus};
