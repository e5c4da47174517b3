//! Direct-Mapped Replacement Policy.
//!
//! A single-way table has no choice to make: every insert overwrites way 0 and
//! there is no usage state to keep.

use super::ReplacementPolicy;

/// Direct-mapped policy; stateless.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectPolicy;

impl ReplacementPolicy for DirectPolicy {
    fn update(&mut self, _set: usize, _way: usize) {}

    fn get_victim(&mut self, _set: usize) -> usize {
        0
    }
}
