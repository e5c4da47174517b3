//! Release queue for loads deferred behind unresolved branches.
//!
//! Loads that complete while shadowed by a speculative branch may not expose
//! their results. The release queue holds their load queue indices in program
//! order. It provides:
//! 1. **Admission:** Up to `width` loads per cycle, each stamped with the last
//!    shadow ring slot it depends on (`shadow tail - 1`).
//! 2. **Release:** The entry at the queue head is released once the shadow
//!    ring's head has moved past its stamp.
//! 3. **Flush:** Global reset.
//!
//! Only one entry can leave per cycle. The release test reads the single head
//! slot and drives the same index on every output lane.

use tracing::debug;

use crate::common::Ring;
use crate::config::Config;
use crate::core::pipeline::signals::{ReleaseInputs, ReleaseOutputs};
use crate::core::pipeline::traits::{RingBuffer, ShadowPointers};

/// A single deferred release.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReleaseEntry {
    /// Last shadow ring slot this load depends on.
    pub stamp: usize,
    /// External load queue index.
    pub payload: u64,
    /// Whether this slot is occupied.
    pub valid: bool,
}

/// Release queue: FIFO of deferred load queue indices.
#[derive(Clone, Debug)]
pub struct ReleaseQueue {
    entries: Vec<ReleaseEntry>,
    ring: Ring,
    /// Lanes per cycle.
    width: usize,
    /// Index of the oldest entry.
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Number of valid entries.
    count: usize,
}

impl ReleaseQueue {
    /// Creates an empty queue of `capacity` entries driven `width` lanes wide.
    pub fn new(capacity: usize, width: usize) -> Self {
        let ring = Ring::new(capacity);
        Self {
            entries: vec![ReleaseEntry::default(); ring.capacity()],
            ring,
            width: width.max(1),
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Creates a queue sized from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.release.capacity, config.shadow.width)
    }

    /// Returns the queue capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns true if the queue is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.ring.capacity()
    }

    /// Index of the oldest entry.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Index where the next entry will be allocated.
    #[inline]
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Returns a reference to the head entry, if the queue is non-empty.
    pub fn peek_head(&self) -> Option<&ReleaseEntry> {
        if self.count == 0 {
            None
        } else {
            Some(&self.entries[self.head])
        }
    }

    /// Iterate over all valid entries from head to tail, calling `f` on each.
    pub fn for_each_valid(&self, mut f: impl FnMut(&ReleaseEntry)) {
        let mut idx = self.head;
        for _ in 0..self.count {
            if self.entries[idx].valid {
                f(&self.entries[idx]);
            }
            idx = self.ring.advance(idx, 1);
        }
    }

    /// Advances the queue by one cycle against the shadow ring's published pointers.
    ///
    /// `shadow` must be the pointers registered at the start of this cycle,
    /// before the shadow ring itself is ticked.
    pub fn tick(&mut self, input: &ReleaseInputs, shadow: &impl ShadowPointers) -> ReleaseOutputs {
        self.step(&input.enqueue, input.flush, shadow)
    }

    pub(crate) fn step(
        &mut self,
        enqueue: &[Option<u64>],
        flush: bool,
        shadow: &impl ShadowPointers,
    ) -> ReleaseOutputs {
        debug_assert!(enqueue.len() <= self.width, "more enqueue lanes than width");
        let shadow_ring = Ring::new(shadow.capacity());

        // Release test on the registered head entry.
        let head_entry = self.entries[self.head];
        let ready = head_entry.valid
            && !shadow_ring.contains(shadow.head(), shadow.tail(), head_entry.stamp);
        let released = ready.then_some(head_entry.payload);
        let outputs = ReleaseOutputs {
            lanes: vec![released; self.width],
        };

        if ready {
            self.entries[self.head].valid = false;
            self.head = self.ring.advance(self.head, 1);
            self.count -= 1;
        }

        if flush {
            self.flush();
            return outputs;
        }

        let stamp = shadow_ring.retreat(shadow.tail(), 1);
        for &payload in enqueue.iter().flatten() {
            debug_assert!(!self.is_full(), "release queue overflow");
            self.entries[self.tail] = ReleaseEntry {
                stamp,
                payload,
                valid: true,
            };
            self.tail = self.ring.advance(self.tail, 1);
            self.count = (self.count + 1).min(self.ring.capacity());
        }

        outputs
    }
}

impl RingBuffer for ReleaseQueue {
    /// Flushes all entries from the queue.
    fn flush(&mut self) {
        debug!(dropped = self.count, "release queue flush");
        for entry in &mut self.entries {
            entry.valid = false;
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    fn occupancy(&self) -> usize {
        self.count
    }
}
