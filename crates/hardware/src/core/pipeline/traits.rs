//! Interfaces shared by the clocked rings.
//!
//! 1. **Published Pointers:** The only state one component may observe in another.
//! 2. **Ring Occupancy:** Flushing and status checks common to every ring.

/// The `head`/`tail` scalars a shadow ring publishes each cycle.
///
/// This is the whole coupling surface between the shadow ring and the release
/// queue; the queue never sees shadow bits or checkpoints.
pub trait ShadowPointers {
    /// Oldest slot still shadowing younger memory operations.
    fn head(&self) -> usize;

    /// Next slot to be allocated.
    fn tail(&self) -> usize;

    /// Number of slots in the shadow ring.
    fn capacity(&self) -> usize;
}

/// A fixed-capacity circular buffer advanced by a clock.
pub trait RingBuffer {
    /// Returns the ring to its reset state.
    fn flush(&mut self);

    /// Number of live entries between head and tail.
    fn occupancy(&self) -> usize;

    /// Checks if the ring holds no live entries.
    fn is_empty(&self) -> bool {
        self.occupancy() == 0
    }
}

/// A snapshot of the pointers a shadow ring published at the start of a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublishedPointers {
    /// Registered head.
    pub head: usize,
    /// Registered tail.
    pub tail: usize,
    /// Ring capacity.
    pub capacity: usize,
}

impl ShadowPointers for PublishedPointers {
    fn head(&self) -> usize {
        self.head
    }

    fn tail(&self) -> usize {
        self.tail
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
