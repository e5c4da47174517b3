//! Modulo arithmetic over fixed-capacity circular buffers.
//!
//! Every ring in the core (the shadow ring, the release queue, the tag
//! pipeline) is a fixed array indexed by `head`/`tail` pointers that wrap at
//! the array capacity. This module centralizes the wrapping so that no caller
//! can produce an out-of-bounds index, even when it violates an occupancy
//! contract.

/// Index arithmetic for a ring of a fixed capacity.
///
/// A ring with `head == tail` is empty, so at most `capacity - 1` slots can be
/// occupied at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ring {
    capacity: usize,
}

impl Ring {
    /// Creates ring arithmetic for `capacity` slots.
    ///
    /// A zero capacity is clamped to one so the modulo operations stay defined.
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity: if capacity == 0 { 1 } else { capacity },
        }
    }

    /// Returns the number of slots in the ring.
    #[inline]
    pub const fn capacity(self) -> usize {
        self.capacity
    }

    /// Reduces an arbitrary index into the ring.
    #[inline]
    pub const fn wrap(self, idx: usize) -> usize {
        idx % self.capacity
    }

    /// Returns `idx + n`, wrapped.
    #[inline]
    pub const fn advance(self, idx: usize, n: usize) -> usize {
        (idx % self.capacity + n % self.capacity) % self.capacity
    }

    /// Returns `idx - n`, wrapped.
    #[inline]
    pub const fn retreat(self, idx: usize, n: usize) -> usize {
        (idx % self.capacity + self.capacity - n % self.capacity) % self.capacity
    }

    /// Number of steps needed to walk forward from `from` to `to`.
    #[inline]
    pub const fn distance(self, from: usize, to: usize) -> usize {
        self.retreat(to, from % self.capacity)
    }

    /// Returns true if `slot` lies in the half-open live window `[head, tail)`.
    #[inline]
    pub const fn contains(self, head: usize, tail: usize, slot: usize) -> bool {
        self.distance(head, slot) < self.distance(head, tail)
    }

    /// Number of free slots given the current pointers.
    #[inline]
    pub const fn free(self, head: usize, tail: usize) -> usize {
        self.capacity - 1 - self.distance(head, tail)
    }
}
