use shadowline_core::Simulator;
use shadowline_core::config::{Config, ReleaseConfig, ShadowConfig, TagSetConfig, TimingMode};
use shadowline_core::sim::{CycleInputs, CycleOutputs};

use super::builder::CycleBuilder;

/// Installs a test-writer subscriber once per process. `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A small configuration that is easy to reason about by hand.
///
/// 8-slot shadow ring, 2 lanes, 8-entry release queue, and an 8-entry 2-way
/// tag set (4 sets, keys `k`, `k + 4`, `k + 8` share a set).
pub fn small_config() -> Config {
    Config {
        shadow: ShadowConfig {
            branches: 8,
            width: 2,
        },
        release: ReleaseConfig { capacity: 8 },
        tag_set: TagSetConfig {
            entries: 8,
            ways: 2,
            tag_width: 16,
            read_ports: 2,
            write_ports: 2,
            timing: TimingMode::MemDelayData,
        },
        ..Default::default()
    }
}

/// Owns a simulator and every output it has produced.
#[derive(Debug)]
pub struct TestContext {
    pub sim: Simulator,
    pub history: Vec<CycleOutputs>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&small_config())
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        let sim = Simulator::new(config).unwrap();
        Self {
            sim,
            history: Vec::new(),
        }
    }

    /// Ticks one cycle and returns its outputs.
    pub fn step(&mut self, input: CycleBuilder) -> CycleOutputs {
        self.tick(&input.build())
    }

    /// Ticks one cycle with prebuilt inputs.
    pub fn tick(&mut self, input: &CycleInputs) -> CycleOutputs {
        let outputs = self.sim.tick(input);
        self.history.push(outputs.clone());
        outputs
    }

    /// Ticks `n` idle cycles.
    pub fn idle(&mut self, n: usize) {
        for _ in 0..n {
            let _ = self.tick(&CycleInputs::default());
        }
    }

    /// Shadow ring `(head, tail)` registered right now.
    pub fn shadow_pointers(&self) -> (usize, usize) {
        let p = self.sim.unit.shadow.pointers();
        (p.head, p.tail)
    }

    /// Every load queue index released so far, in release order.
    pub fn released(&self) -> Vec<u64> {
        self.history
            .iter()
            .filter_map(|o| o.unit.released_entry())
            .collect()
    }

    /// Every rollback checkpoint emitted so far.
    pub fn rollbacks(&self) -> Vec<u64> {
        self.history.iter().filter_map(|o| o.unit.rollback).collect()
    }

    /// Issues a lookup on port 0 and returns its result two cycles later.
    pub fn lookup(&mut self, key: u64) -> bool {
        let _ = self.step(CycleBuilder::new().lookup(key));
        self.idle(1);
        let out = self.step(CycleBuilder::new());
        out.tags.results[0].unwrap()
    }
}
