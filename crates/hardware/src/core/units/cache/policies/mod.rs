//! Tag Table Replacement Policies.
//!
//! Implements victim selection for the tag set.
//!
//! # Policies
//!
//! - `Direct`: Direct-mapped; the only way is always the victim.
//! - `BitLru`: One LRU bit per set, exact LRU for two ways.

/// One-bit LRU replacement policy.
pub mod bit_lru;

/// Direct-mapped (single way) replacement policy.
pub mod direct;

pub use bit_lru::BitLruPolicy;
pub use direct::DirectPolicy;

/// Trait for tag table replacement policies.
///
/// Defines the interface for updating usage state and selecting victim ways.
pub trait ReplacementPolicy: Send + Sync + std::fmt::Debug {
    /// Marks `way` of `set` as most recently used.
    ///
    /// # Arguments
    ///
    /// * `set` - The set index.
    /// * `way` - The way that was hit or written.
    fn update(&mut self, set: usize, way: usize);

    /// Selects the way to overwrite in `set`.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn get_victim(&mut self, set: usize) -> usize;
}

/// Builds the policy for a table of `sets` sets and `ways` ways.
pub fn for_ways(sets: usize, ways: usize) -> Box<dyn ReplacementPolicy> {
    if ways <= 1 {
        Box::new(DirectPolicy)
    } else {
        Box::new(BitLruPolicy::new(sets))
    }
}
