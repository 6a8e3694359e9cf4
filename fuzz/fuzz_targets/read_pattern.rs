#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use pullstream::{PullStream, ReplayTransfer};

// Derive an arbitrary interleaving of engine chunk sizes and caller read
// sizes from the fuzz input, then check byte conservation and accounting.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    // First two bytes pick the size patterns, the rest is the payload
    let chunk_seed = data[0] as usize + 1;
    let read_seed = data[1] as usize % 64 + 1;
    let payload = &data[2..];

    let chunks: Vec<Bytes> = payload
        .chunks(chunk_seed)
        .map(Bytes::copy_from_slice)
        .collect();

    let mut stream = PullStream::single(ReplayTransfer::new(chunks));
    let mut collected = Vec::with_capacity(payload.len());
    let mut dest = vec![0u8; read_seed];

    loop {
        let n = stream.read_at(&mut dest, 0, read_seed).unwrap();

        // Accounting invariant: everything seen is either delivered or pending
        assert!(stream.position() <= stream.len());

        if n == 0 {
            break;
        }
        collected.extend_from_slice(&dest[..n]);
    }

    // Conservation: delivered bytes equal the payload exactly once, in order
    assert_eq!(collected, payload);
    assert_eq!(stream.len(), payload.len() as u64);
    assert_eq!(stream.position(), stream.len());

    // EOF is stable
    assert_eq!(stream.read_at(&mut dest, 0, read_seed).unwrap(), 0);

    // Disposal is idempotent and fatal to reads
    stream.dispose();
    stream.dispose();
    assert!(stream.read_at(&mut dest, 0, read_seed).is_err());
});
