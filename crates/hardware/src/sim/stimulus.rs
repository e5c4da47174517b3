//! Stimulus: a recorded sequence of per-cycle inputs.
//!
//! A stimulus file is JSON of the form
//!
//! ```json
//! {
//!   "cycles": [
//!     { "unit": { "new_branches": [true, true] } },
//!     { "unit": { "enqueue": [7] }, "tags": { "inserts": [4096] } },
//!     { "unit": { "safe": [0, 1] } }
//!   ],
//!   "drain": 4
//! }
//! ```
//!
//! Missing fields are idle; `drain` appends that many idle cycles so pipelined
//! results and pending releases can leave the model.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::StimulusError;
use crate::core::pipeline::signals::{TagInputs, TagOutputs, UnitInputs, UnitOutputs};

/// Inputs driven into every component for one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleInputs {
    /// Shadow ring and release queue inputs.
    pub unit: UnitInputs,
    /// Tag set inputs.
    pub tags: TagInputs,
}

/// Outputs observed from every component in one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleOutputs {
    /// Cycle number, starting at 0.
    pub cycle: u64,
    /// Shadow ring and release queue outputs.
    pub unit: UnitOutputs,
    /// Tag set outputs.
    pub tags: TagOutputs,
}

/// A recorded input sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stimulus {
    /// Inputs, one record per cycle.
    pub cycles: Vec<CycleInputs>,
    /// Idle cycles to run after the last record.
    #[serde(default)]
    pub drain: usize,
}

impl Stimulus {
    /// Parses a JSON stimulus.
    pub fn from_json(text: &str) -> Result<Self, StimulusError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON stimulus file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StimulusError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Total cycles the stimulus runs for, including drain.
    pub fn len(&self) -> usize {
        self.cycles.len() + self.drain
    }

    /// Returns true if the stimulus runs no cycles.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates every cycle's inputs, drain cycles included.
    pub fn iter(&self) -> impl Iterator<Item = CycleInputs> + '_ {
        self.cycles
            .iter()
            .cloned()
            .chain(std::iter::repeat_with(CycleInputs::default).take(self.drain))
    }
}
