//! Shadow ring for branch-shadowed memory operations.
//!
//! The shadow ring is a circular buffer with one slot per unresolved
//! speculative branch. It provides:
//! 1. **Allocation:** Up to `width` new branches per cycle, FIFO in lane order.
//! 2. **Resolution:** Branch-safe signals clear a slot's shadow bit at any position.
//! 3. **In-order Retirement:** `head` advances only across a contiguous clear prefix.
//! 4. **Rollback:** A misprediction truncates `tail` to the mispredicted slot and
//!    releases the slot's checkpoint one cycle later.
//! 5. **Flush:** Global reset of both pointers.
//!
//! Every cycle is computed from the registered state and committed at the end
//! of [`ShadowTracker::tick`], so nothing written in a cycle is visible to that
//! same cycle's head scan.

use tracing::debug;

use crate::common::Ring;
use crate::config::ShadowConfig;
use crate::core::pipeline::signals::{Mispredict, ShadowInputs, ShadowOutputs};
use crate::core::pipeline::traits::{PublishedPointers, RingBuffer, ShadowPointers};

/// Shadow ring: tracks which branches still shadow younger memory operations.
#[derive(Clone, Debug)]
pub struct ShadowTracker {
    ring: Ring,
    /// Lanes per cycle.
    width: usize,
    /// Oldest slot still shadowing.
    head: usize,
    /// Next slot to allocate.
    tail: usize,
    /// True while the slot's branch is unresolved.
    shadowed: Vec<bool>,
    /// Release queue tail recorded when the slot was allocated.
    checkpoint: Vec<u64>,
    /// One-cycle delay register for misprediction releases.
    release: Option<u64>,
}

impl ShadowTracker {
    /// Creates an empty ring of `branches` slots driven `width` lanes wide.
    pub fn new(branches: usize, width: usize) -> Self {
        let ring = Ring::new(branches);
        Self {
            ring,
            width: width.max(1),
            head: 0,
            tail: 0,
            shadowed: vec![false; ring.capacity()],
            checkpoint: vec![0; ring.capacity()],
            release: None,
        }
    }

    /// Creates a ring sized from configuration.
    pub fn from_config(config: &ShadowConfig) -> Self {
        Self::new(config.branches, config.width)
    }

    /// Returns the lane count.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of slots that can still be allocated.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.ring.free(self.head, self.tail)
    }

    /// Returns true if `slot`'s branch is still unresolved.
    pub fn is_shadowed(&self, slot: usize) -> bool {
        self.shadowed[self.ring.wrap(slot)]
    }

    /// Returns the checkpoint recorded for `slot`.
    pub fn checkpoint(&self, slot: usize) -> u64 {
        self.checkpoint[self.ring.wrap(slot)]
    }

    /// Returns the release waiting in the delay register, if any.
    pub fn pending_release(&self) -> Option<u64> {
        self.release
    }

    /// Returns the pointers as published at the current cycle boundary.
    pub fn pointers(&self) -> PublishedPointers {
        PublishedPointers {
            head: self.head,
            tail: self.tail,
            capacity: self.ring.capacity(),
        }
    }

    /// Advances the ring by one cycle.
    ///
    /// Returns the registered outputs as they stood at the start of the cycle.
    pub fn tick(&mut self, input: &ShadowInputs) -> ShadowOutputs {
        self.step(
            &input.new_branches,
            input.checkpoint,
            &input.safe,
            input.mispredict,
            input.flush,
        )
    }

    pub(crate) fn step(
        &mut self,
        new_branches: &[bool],
        checkpoint: u64,
        safe: &[Option<usize>],
        mispredict: Option<Mispredict>,
        flush: bool,
    ) -> ShadowOutputs {
        let outputs = ShadowOutputs {
            head: self.head,
            tail: self.tail,
            release: self.release,
        };

        let allocated = new_branches.iter().filter(|&&b| b).count();
        debug_assert!(new_branches.len() <= self.width, "more branch lanes than width");
        debug_assert!(safe.len() <= self.width, "more safe lanes than width");
        debug_assert!(
            flush || allocated <= self.free_slots(),
            "shadow ring over-allocated: {allocated} new, {} free",
            self.free_slots()
        );

        // Compute phase: everything below reads only the registered state.
        let next_head = self.ring.advance(self.head, self.clear_prefix());
        let mut next_tail = self.ring.advance(self.tail, allocated);
        let mut next_release = None;
        if let Some(m) = mispredict {
            let slot = self.ring.wrap(m.slot);
            debug_assert!(
                self.ring.contains(self.head, self.tail, slot),
                "mispredict of slot {slot} outside live window [{}, {})",
                self.head,
                self.tail
            );
            debug_assert!(
                self.ring.distance(self.head, next_head) <= self.ring.distance(self.head, slot),
                "head would pass mispredicted slot {slot}"
            );
            next_tail = slot;
            next_release = Some(self.checkpoint[slot]);
        }

        // Commit phase, in priority order: allocate, resolve, roll back, flush.
        for rank in 0..allocated {
            let slot = self.ring.advance(self.tail, rank);
            self.shadowed[slot] = true;
            self.checkpoint[slot] = checkpoint;
        }
        for slot in safe.iter().flatten() {
            debug_assert!(*slot < self.ring.capacity(), "safe slot {slot} out of range");
            self.shadowed[self.ring.wrap(*slot)] = false;
        }
        if let Some(m) = mispredict {
            debug!(
                slot = m.slot,
                released = ?next_release,
                discarded = self.ring.distance(self.ring.wrap(m.slot), self.tail),
                "shadow rollback"
            );
            let slot = self.ring.wrap(m.slot);
            self.shadowed[slot] = false;
            self.checkpoint[slot] = 0;
        }

        self.head = next_head;
        self.tail = next_tail;
        self.release = next_release;

        if flush {
            self.flush();
        }

        outputs
    }

    /// Length of the run of resolved slots starting at `head`, capped at the
    /// lane count and never reaching `tail`.
    fn clear_prefix(&self) -> usize {
        (0..self.width)
            .take_while(|&w| {
                let slot = self.ring.advance(self.head, w);
                slot != self.tail && !self.shadowed[slot]
            })
            .count()
    }
}

impl ShadowPointers for ShadowTracker {
    fn head(&self) -> usize {
        self.head
    }

    fn tail(&self) -> usize {
        self.tail
    }

    fn capacity(&self) -> usize {
        self.ring.capacity()
    }
}

impl RingBuffer for ShadowTracker {
    /// Resets both pointers to slot 0.
    ///
    /// Only slot 0 is scrubbed; every other slot keeps stale contents that are
    /// unreachable while `head == tail`.
    fn flush(&mut self) {
        debug!(head = self.head, tail = self.tail, "shadow flush");
        self.head = 0;
        self.tail = 0;
        self.shadowed[0] = false;
        self.checkpoint[0] = 0;
        self.release = None;
    }

    fn occupancy(&self) -> usize {
        self.ring.distance(self.head, self.tail)
    }
}
