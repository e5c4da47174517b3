//! One-Bit LRU Replacement Policy.
//!
//! For a two-way set a single bit is exact LRU: it names the way that was not
//! touched most recently. A hit or a write to one way points the bit at the
//! other way.
//!
//! # Performance
//!
//! - **Time Complexity:** `update()` and `get_victim()` are O(1)
//! - **Space Complexity:** one bit per set
//! - **Hardware Cost:** Minimal

use super::ReplacementPolicy;

/// One-bit LRU state.
#[derive(Clone, Debug)]
pub struct BitLruPolicy {
    /// Least recently used way per set.
    lru: Vec<bool>,
}

impl BitLruPolicy {
    /// Creates a policy for `sets` sets with way 0 as every set's initial victim.
    pub fn new(sets: usize) -> Self {
        Self {
            lru: vec![false; sets],
        }
    }
}

impl ReplacementPolicy for BitLruPolicy {
    /// Points the set's LRU bit away from `way`.
    fn update(&mut self, set: usize, way: usize) {
        self.lru[set] = way == 0;
    }

    /// Returns the way the LRU bit names.
    fn get_victim(&mut self, set: usize) -> usize {
        usize::from(self.lru[set])
    }
}
