//! Pipelined Set-Associative Tag Set.
//!
//! This module implements a small associative tag table used to test whether
//! an address overlaps one already recorded. It models:
//! 1. **Lookup:** Up to `read_ports` queries per cycle, each answered exactly
//!    [`LOOKUP_LATENCY`] cycles after it is accepted.
//! 2. **Insert:** Up to `write_ports` writes per cycle that land at the end of
//!    the same cycle, after that cycle's lookups have read the table.
//! 3. **Replacement:** Direct-mapped or two-way with one LRU bit per set.
//! 4. **Flush:** Invalidation of every entry at the cycle boundary.

/// Replacement policy implementations (direct-mapped, one-bit LRU).
pub mod policies;

use tracing::{debug, trace};

use self::policies::ReplacementPolicy;
use crate::common::error::ConfigError;
use crate::config::{TagSetConfig, TimingMode};
use crate::core::pipeline::signals::{TagInputs, TagOutputs};

/// Cycles between accepting a lookup and producing its result.
pub const LOOKUP_LATENCY: usize = 2;

/// Tag slot containing the stored tag and its validity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TagLine {
    tag: u64,
    valid: bool,
}

/// What a read port registers between acceptance and its result.
///
/// Every mode matches against the table as it stood at acceptance, before that
/// cycle's inserts and flush. The modes differ only in the registered value.
#[derive(Clone, Copy, Debug)]
enum Latched {
    /// `MemDelayAddr`: the split key, with the way it matched.
    Address {
        set: usize,
        tag: u64,
        way: Option<usize>,
    },
    /// `MemDelayData`: the set as read at acceptance, compared next cycle.
    ReadData { tag: u64, lines: [TagLine; 2] },
    /// `Sync`: the comparison already happened.
    Resolved(bool),
}

/// Tag set with pipelined lookup and same-cycle insert.
#[derive(Debug)]
pub struct TagSet {
    /// Way-major within a set: slot `set * ways + way`.
    lines: Vec<TagLine>,
    sets: usize,
    ways: usize,
    index_bits: u32,
    key_mask: u64,
    read_ports: usize,
    write_ports: usize,
    timing: TimingMode,
    policy: Box<dyn ReplacementPolicy>,
    /// First pipeline register, one per read port.
    stage1: Vec<Option<Latched>>,
    /// Second pipeline register: the result driven next cycle.
    stage2: Vec<Option<bool>>,
}

impl TagSet {
    /// Creates an empty tag set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry cannot be split into a
    /// power-of-two set index and a non-empty tag.
    pub fn new(config: &TagSetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let sets = config.sets();
        let key_mask = if config.tag_width >= 64 {
            u64::MAX
        } else {
            (1u64 << config.tag_width) - 1
        };
        Ok(Self {
            lines: vec![TagLine::default(); config.entries],
            sets,
            ways: config.ways,
            index_bits: config.index_bits(),
            key_mask,
            read_ports: config.read_ports,
            write_ports: config.write_ports,
            timing: config.timing,
            policy: policies::for_ways(sets, config.ways),
            stage1: vec![None; config.read_ports],
            stage2: vec![None; config.read_ports],
        })
    }

    /// Returns the number of sets.
    #[inline]
    pub fn sets(&self) -> usize {
        self.sets
    }

    /// Returns the associativity.
    #[inline]
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Returns the configured read timing.
    #[inline]
    pub fn timing(&self) -> TimingMode {
        self.timing
    }

    /// Splits a key into its set index and stored tag.
    #[inline]
    pub fn split(&self, addr: u64) -> (usize, u64) {
        let key = addr & self.key_mask;
        let set = (key & (self.sets as u64 - 1)) as usize;
        (set, key >> self.index_bits)
    }

    /// Checks the current table for `addr` without touching replacement state.
    ///
    /// This is a debug view; pipelined lookups go through [`TagSet::tick`].
    pub fn contains(&self, addr: u64) -> bool {
        let (set, tag) = self.split(addr);
        self.probe(set, tag).is_some()
    }

    /// Returns true if no lookup is in flight.
    pub fn is_idle(&self) -> bool {
        self.stage1.iter().all(Option::is_none) && self.stage2.iter().all(Option::is_none)
    }

    /// Advances the tag set by one cycle.
    ///
    /// Returns, per read port, the result of the lookup accepted
    /// [`LOOKUP_LATENCY`] cycles ago.
    pub fn tick(&mut self, input: &TagInputs) -> TagOutputs {
        debug_assert!(input.lookups.len() <= self.read_ports, "more lookups than read ports");
        debug_assert!(input.inserts.len() <= self.write_ports, "more inserts than write ports");

        let outputs = TagOutputs {
            results: self.stage2.clone(),
        };

        let next_stage2: Vec<Option<bool>> = self
            .stage1
            .iter()
            .map(|latched| {
                let hit = match (*latched)? {
                    Latched::Address { set, tag, way } => {
                        trace!(set, tag, ?way, "tag lookup resolved");
                        way.is_some()
                    }
                    Latched::ReadData { tag, lines } => lines[..self.ways]
                        .iter()
                        .any(|l| l.valid && l.tag == tag),
                    Latched::Resolved(hit) => hit,
                };
                Some(hit)
            })
            .collect();

        // Hits mark their way most recently used before any insert picks a
        // victim, in port order.
        let mut touches = Vec::new();

        let next_stage1: Vec<Option<Latched>> = (0..self.read_ports)
            .map(|port| {
                let addr = input.lookups.get(port).copied().flatten()?;
                let (set, tag) = self.split(addr);
                let way = self.probe(set, tag);
                if let Some(w) = way {
                    touches.push((set, w));
                }
                Some(match self.timing {
                    TimingMode::MemDelayAddr => Latched::Address { set, tag, way },
                    TimingMode::MemDelayData => Latched::ReadData {
                        tag,
                        lines: self.read_set(set),
                    },
                    TimingMode::Sync => Latched::Resolved(way.is_some()),
                })
            })
            .collect();

        for (set, way) in touches {
            self.policy.update(set, way);
        }

        for &addr in input.inserts.iter().flatten() {
            self.insert(addr);
        }

        if input.flush {
            debug!(sets = self.sets, ways = self.ways, "tag set flush");
            for line in &mut self.lines {
                line.valid = false;
            }
        }

        self.stage1 = next_stage1;
        self.stage2 = next_stage2;
        outputs
    }

    /// Writes `addr` into its set's victim way and marks that way most recently used.
    fn insert(&mut self, addr: u64) {
        let (set, tag) = self.split(addr);
        let way = self.policy.get_victim(set);
        let slot = &mut self.lines[set * self.ways + way];
        if slot.valid {
            trace!(set, way, evicted = slot.tag, tag, "tag set eviction");
        }
        *slot = TagLine { tag, valid: true };
        self.policy.update(set, way);
    }

    /// Finds the way of `set` holding a valid `tag`.
    fn probe(&self, set: usize, tag: u64) -> Option<usize> {
        let base = set * self.ways;
        self.lines[base..base + self.ways]
            .iter()
            .position(|l| l.valid && l.tag == tag)
    }

    /// Copies a set out of the table; unused ways read as invalid.
    fn read_set(&self, set: usize) -> [TagLine; 2] {
        let base = set * self.ways;
        let mut lines = [TagLine::default(); 2];
        lines[..self.ways].copy_from_slice(&self.lines[base..base + self.ways]);
        lines
    }
}
