//! Simulation driver and stimulus loading.
//!
//! Provides the lock-step simulator that owns every clocked component and
//! the JSON stimulus format used to drive it.

/// Lock-step simulator over the shadow unit and tag set.
pub mod simulator;

/// Per-cycle stimulus records and loading.
pub mod stimulus;

pub use simulator::Simulator;
pub use stimulus::{CycleInputs, CycleOutputs, Stimulus};
