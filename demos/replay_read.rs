//! Basic blocking read over a scripted transfer.
//!
//! Run with:
//!     cargo run --example replay_read

use std::io::Read;

use bytes::Bytes;
use pullstream::{PullStream, ReplayTransfer, TransferSet};

fn main() -> std::io::Result<()> {
    // Stand-in for an engine-backed transfer: three chunks, then done.
    let transfer = ReplayTransfer::new(vec![
        Bytes::from_static(b"HTTP-ish "),
        Bytes::from_static(b"response "),
        Bytes::from_static(b"body"),
    ]);

    let mut stream = PullStream::new(TransferSet::single(transfer));

    // Read in small steps to show the pull model at work.
    let mut dest = [0u8; 5];
    loop {
        let n = stream.read(&mut dest)?;
        if n == 0 {
            break;
        }
        println!(
            "read {:>2} bytes ({:>2}/{} seen): {:?}",
            n,
            stream.position(),
            stream.len(),
            String::from_utf8_lossy(&dest[..n])
        );
    }

    println!("done: {} bytes total", stream.len());
    Ok(())
}
