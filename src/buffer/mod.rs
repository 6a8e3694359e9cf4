//! Internal pending-byte buffer (received but not yet delivered).

/// Minimum (and initial) buffer capacity in bytes.
///
/// Capacity grows by repeated doubling from this value and never shrinks,
/// so it is always a power-of-two multiple of the minimum.
pub const MIN_CAPACITY: usize = 4096;

/// A growable byte FIFO with the unconsumed region pinned at offset 0.
///
/// New chunks are appended at the tail; after a partial take the remaining
/// bytes are shifted back to the front. The shift costs O(remaining) per
/// take, which in the common case is bounded by one engine chunk.
pub(crate) struct PendingBuffer {
    data: Vec<u8>,
}

impl PendingBuffer {
    /// Creates an empty buffer with the minimum capacity preallocated.
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(MIN_CAPACITY),
        }
    }

    /// Appends a chunk at the tail, doubling capacity as needed to fit.
    pub fn append(&mut self, chunk: &[u8]) {
        let required = self.data.len() + chunk.len();
        if required > self.data.capacity() {
            let mut cap = self.data.capacity().max(MIN_CAPACITY);
            while cap < required {
                cap <<= 1;
            }
            self.data.reserve_exact(cap - self.data.len());
        }
        self.data.extend_from_slice(chunk);
    }

    /// Moves up to `dest.len()` bytes from the front into `dest`, compacts
    /// the remainder back to offset 0, and returns the number moved.
    pub fn take_into(&mut self, dest: &mut [u8]) -> usize {
        let n = self.data.len().min(dest.len());
        if n == 0 {
            return 0;
        }

        dest[..n].copy_from_slice(&self.data[..n]);

        // Keep any remaining data at the front
        self.data.copy_within(n.., 0);
        self.data.truncate(self.data.len() - n);

        n
    }

    /// Number of buffered bytes not yet delivered.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no undelivered bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current allocated capacity in bytes.
    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }
}
