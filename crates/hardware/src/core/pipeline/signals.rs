//! Per-cycle signal records exchanged with the surrounding pipeline.
//!
//! This module defines the input and output bundles of every clocked component.
//! It provides:
//! 1. **Shadow Signals:** Branch allocation, branch-safe, misprediction, and flush inputs.
//! 2. **Release Signals:** Deferred-release admission and the per-lane release result.
//! 3. **Unit Signals:** The combined bundle driven into a [`ShadowUnit`](super::unit::ShadowUnit).
//!
//! Per-lane vectors may be shorter than the configured width; missing lanes are
//! idle. An empty vector is therefore a cycle with no activity on that interface.

use serde::{Deserialize, Serialize};

/// A resolved misprediction, carried into the shadow ring for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mispredict {
    /// Shadow ring slot of the mispredicted branch. Allocations at or after it are discarded.
    pub slot: usize,
    /// Checkpoint reported by the upstream resolver. Part of the rollback
    /// request's wire shape; the cleared slot's own checkpoint resets to zero.
    #[serde(default)]
    pub checkpoint: u64,
}

/// Inputs to [`ShadowTracker::tick`](super::shadow::ShadowTracker::tick).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowInputs {
    /// One flag per lane; true allocates a new speculative branch.
    pub new_branches: Vec<bool>,
    /// Checkpoint stamped on every branch allocated this cycle.
    pub checkpoint: u64,
    /// One optional slot per lane; each marks that slot's branch resolved.
    pub safe: Vec<Option<usize>>,
    /// Rollback request.
    pub mispredict: Option<Mispredict>,
    /// Global reset.
    pub flush: bool,
}

/// Registered outputs of the shadow ring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowOutputs {
    /// Oldest slot still shadowing younger memory operations.
    pub head: usize,
    /// Next slot to be allocated.
    pub tail: usize,
    /// Checkpoint of a branch that mispredicted in the previous cycle.
    pub release: Option<u64>,
}

/// Inputs to [`ReleaseQueue::tick`](super::release::ReleaseQueue::tick).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseInputs {
    /// One optional external index per lane to defer.
    pub enqueue: Vec<Option<u64>>,
    /// Global reset.
    pub flush: bool,
}

/// Per-lane release results of the release queue.
///
/// At most one entry is released per cycle; when it is, every lane carries the
/// same index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseOutputs {
    /// One optional external index per lane.
    pub lanes: Vec<Option<u64>>,
}

impl ReleaseOutputs {
    /// The entry released this cycle, if any.
    pub fn entry(&self) -> Option<u64> {
        self.lanes.first().copied().flatten()
    }
}

/// Inputs to [`ShadowUnit::tick`](super::unit::ShadowUnit::tick).
///
/// The allocation checkpoint is not an input here: the unit stamps each branch
/// with its own release queue tail.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitInputs {
    /// One flag per lane; true allocates a new speculative branch.
    pub new_branches: Vec<bool>,
    /// One optional slot per lane; each marks that slot's branch resolved.
    pub safe: Vec<Option<usize>>,
    /// Rollback request.
    pub mispredict: Option<Mispredict>,
    /// One optional load queue index per lane to defer.
    pub enqueue: Vec<Option<u64>>,
    /// Global reset of both rings.
    pub flush: bool,
}

/// Outputs of a [`ShadowUnit`](super::unit::ShadowUnit) cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOutputs {
    /// Shadow ring head at the start of the cycle.
    pub head: usize,
    /// Shadow ring tail at the start of the cycle.
    pub tail: usize,
    /// Delayed misprediction release from the shadow ring.
    pub rollback: Option<u64>,
    /// Per-lane release results from the release queue.
    pub released: Vec<Option<u64>>,
}

impl UnitOutputs {
    /// The load queue index released this cycle, if any.
    pub fn released_entry(&self) -> Option<u64> {
        self.released.first().copied().flatten()
    }
}

/// Inputs to [`TagSet::tick`](crate::core::units::cache::TagSet::tick).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagInputs {
    /// One optional key per read port; results appear two cycles later.
    pub lookups: Vec<Option<u64>>,
    /// One optional key per write port; takes effect this cycle.
    pub inserts: Vec<Option<u64>>,
    /// Invalidate every entry at the end of this cycle.
    pub flush: bool,
}

/// Outputs of a tag set cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOutputs {
    /// One result per read port for the lookup accepted two cycles ago.
    pub results: Vec<Option<bool>>,
}
