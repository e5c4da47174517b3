//! Simulator: owns every clocked component and advances them in lock step.
//!
//! Each call to [`Simulator::tick`] is one clock edge. All components compute
//! their outputs from state registered at the previous edge and commit their
//! next state before `tick` returns.

use tracing::trace;

use crate::common::error::ConfigError;
use crate::config::Config;
use crate::core::pipeline::traits::RingBuffer;
use crate::core::{ShadowUnit, TagSet};
use crate::sim::stimulus::{CycleInputs, CycleOutputs, Stimulus};
use crate::stats::SimStats;

/// Top-level simulator: shadow unit, tag set, and statistics.
#[derive(Debug)]
pub struct Simulator {
    /// Shadow ring and release queue.
    pub unit: ShadowUnit,
    /// Associative tag table.
    pub tags: TagSet,
    /// Activity counters.
    pub stats: SimStats,
    cycle: u64,
    trace: bool,
}

impl Simulator {
    /// Creates a simulator with every component in its reset state.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any section of `config` is invalid.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            unit: ShadowUnit::new(config),
            tags: TagSet::new(&config.tag_set)?,
            stats: SimStats::default(),
            cycle: 0,
            trace: config.general.trace || cfg!(feature = "always-trace"),
        })
    }

    /// Number of cycles simulated so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self, input: &CycleInputs) -> CycleOutputs {
        let unit = self.unit.tick(&input.unit);
        let tags = self.tags.tick(&input.tags);
        let outputs = CycleOutputs {
            cycle: self.cycle,
            unit,
            tags,
        };

        self.record(input, &outputs);
        if self.trace {
            trace!(
                cycle = outputs.cycle,
                head = outputs.unit.head,
                tail = outputs.unit.tail,
                released = ?outputs.unit.released_entry(),
                rollback = ?outputs.unit.rollback,
                tag_results = ?outputs.tags.results,
                "cycle"
            );
        }
        self.cycle += 1;
        outputs
    }

    /// Runs an entire stimulus, returning every cycle's outputs.
    pub fn run(&mut self, stimulus: &Stimulus) -> Vec<CycleOutputs> {
        stimulus.iter().map(|input| self.tick(&input)).collect()
    }

    /// Runs `cycles` cycles with no inputs asserted.
    pub fn idle(&mut self, cycles: usize) -> Vec<CycleOutputs> {
        (0..cycles).map(|_| self.tick(&CycleInputs::default())).collect()
    }

    fn record(&mut self, input: &CycleInputs, outputs: &CycleOutputs) {
        let stats = &mut self.stats;
        let unit = &input.unit;
        stats.cycles += 1;

        if unit.flush {
            stats.flushes += 1;
        } else {
            stats.branches_allocated += unit.new_branches.iter().filter(|&&b| b).count() as u64;
            stats.loads_deferred += unit.enqueue.iter().flatten().count() as u64;
        }
        stats.branches_resolved += unit.safe.iter().flatten().count() as u64;
        stats.mispredictions += u64::from(unit.mispredict.is_some());
        stats.loads_released += u64::from(outputs.unit.released_entry().is_some());
        stats.shadow_occupancy_sum += self.unit.shadow.occupancy() as u64;
        stats.release_occupancy_sum += self.unit.release.occupancy() as u64;

        for hit in outputs.tags.results.iter().flatten() {
            stats.tag_lookups += 1;
            stats.tag_hits += u64::from(*hit);
        }
        if !input.tags.flush {
            stats.tag_inserts += input.tags.inserts.iter().flatten().count() as u64;
        }
    }
}
