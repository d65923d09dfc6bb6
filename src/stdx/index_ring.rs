//! Ring keyed by logical element indices.
//!
//! This buffer models a logical, ever-growing stream of elements. Index `i`
//! names the `i`-th element ever fetched; the ring retains only the most
//! recent `capacity` of them. Elements are materialized lazily: asking for
//! the index one past the newest retained element fetches it from a caller
//! supplied source.
//!
//! # Invariants
//! - `start_index <= end_index` and `end_index - start_index <= capacity`.
//! - The element with logical index `i` in `[start_index, end_index)` lives
//!   in slot `i % capacity`.
//!
//! # Access contract
//! Only a retained index or `end_index` may be requested. Anything else
//! means the caller lost track of its window (it skipped ahead, or fell
//! behind by more than `capacity`), which is a logic defect and panics.

/// Fixed-capacity ring over a lazily fetched element stream.
pub struct IndexRing<T> {
    buf: Vec<T>,
    capacity: usize,
    start_index: usize,
    end_index: usize,
}

impl<T: Copy> IndexRing<T> {
    /// Creates an empty ring with a fixed `capacity`.
    ///
    /// # Panics
    /// Panics if `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "IndexRing capacity must be > 0");
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            start_index: 0,
            end_index: 0,
        }
    }

    /// Returns the maximum number of elements the ring can retain.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Logical index of the oldest retained element.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Logical index the next fetched element will get.
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// Returns true if `index` is retained.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    /// Drops all retained elements and restarts numbering at 0.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.start_index = 0;
        self.end_index = 0;
    }

    /// Returns element `index`, calling `fetch` to append it when
    /// `index == end_index`. Appending to a full ring evicts the oldest
    /// element.
    ///
    /// # Panics
    /// Panics if `index` is neither retained nor `end_index`.
    pub fn get_or_fetch(&mut self, index: usize, fetch: impl FnOnce() -> T) -> T {
        if self.contains(index) {
            return self.buf[index % self.capacity];
        }
        assert_eq!(
            index, self.end_index,
            "IndexRing accessed out of sequence (retained [{}, {}))",
            self.start_index, self.end_index
        );

        let value = fetch();
        let slot = index % self.capacity;
        if slot == self.buf.len() {
            self.buf.push(value);
        } else {
            self.buf[slot] = value;
        }
        self.end_index += 1;
        if self.end_index - self.start_index > self.capacity {
            self.start_index += 1;
        }
        value
    }
}
