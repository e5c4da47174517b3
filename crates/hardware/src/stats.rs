//! Simulation statistics collection and reporting.
//!
//! This module tracks activity counters for the core. It provides:
//! 1. **Cycles:** Total simulated cycles and host throughput.
//! 2. **Shadow ring:** Branches allocated, resolved, rolled back, and flushes.
//! 3. **Release queue:** Loads deferred and released, and mean occupancy.
//! 4. **Tag set:** Lookups, hits, misses, and inserts.

use std::fmt::Write;
use std::time::Instant;

/// Simulation statistics structure tracking all activity counters.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,

    /// Branches allocated into the shadow ring.
    pub branches_allocated: u64,
    /// Branch-safe signals received.
    pub branches_resolved: u64,
    /// Misprediction rollbacks.
    pub mispredictions: u64,
    /// Global flushes.
    pub flushes: u64,
    /// Sum over cycles of shadow ring occupancy.
    pub shadow_occupancy_sum: u64,

    /// Loads admitted to the release queue.
    pub loads_deferred: u64,
    /// Loads released from the release queue.
    pub loads_released: u64,
    /// Sum over cycles of release queue occupancy.
    pub release_occupancy_sum: u64,

    /// Tag set lookups whose result was delivered.
    pub tag_lookups: u64,
    /// Tag set lookup hits.
    pub tag_hits: u64,
    /// Tag set inserts.
    pub tag_inserts: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            branches_allocated: 0,
            branches_resolved: 0,
            mispredictions: 0,
            flushes: 0,
            shadow_occupancy_sum: 0,
            loads_deferred: 0,
            loads_released: 0,
            release_occupancy_sum: 0,
            tag_lookups: 0,
            tag_hits: 0,
            tag_inserts: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"shadow"`, `"release"`, `"tags"`.
/// Pass an empty slice to `report_sections` to include all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "shadow", "release", "tags"];

const RULE: &str = "----------------------------------------------------------";

impl SimStats {
    /// Tag set lookup misses.
    pub fn tag_misses(&self) -> u64 {
        self.tag_lookups - self.tag_hits
    }

    /// Fraction of lookups that hit, or 0 with no lookups.
    pub fn tag_hit_rate(&self) -> f64 {
        if self.tag_lookups == 0 {
            0.0
        } else {
            self.tag_hits as f64 / self.tag_lookups as f64
        }
    }

    /// Mean shadow ring occupancy per cycle.
    pub fn mean_shadow_occupancy(&self) -> f64 {
        self.shadow_occupancy_sum as f64 / self.cycles.max(1) as f64
    }

    /// Mean release queue occupancy per cycle.
    pub fn mean_release_occupancy(&self) -> f64 {
        self.release_occupancy_sum as f64 / self.cycles.max(1) as f64
    }

    /// Formats every section.
    pub fn report(&self) -> String {
        self.report_sections(&[])
    }

    /// Formats only the requested sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to format all sections (same as `report()`).
    pub fn report_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let mut out = String::new();

        // Writing into a String cannot fail.
        if want("summary") {
            let seconds = self.start_time.elapsed().as_secs_f64();
            let khz = if seconds > 0.0 {
                (self.cycles as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            let _ = writeln!(out, "==========================================================");
            let _ = writeln!(out, "SHADOW CORE SIMULATION STATISTICS");
            let _ = writeln!(out, "==========================================================");
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_freq                 {khz:.2} kHz");
            let _ = writeln!(out, "{RULE}");
        }

        if want("shadow") {
            let _ = writeln!(out, "SHADOW RING");
            let _ = writeln!(out, "  branches.allocated     {}", self.branches_allocated);
            let _ = writeln!(out, "  branches.resolved      {}", self.branches_resolved);
            let _ = writeln!(out, "  mispredictions         {}", self.mispredictions);
            let _ = writeln!(out, "  flushes                {}", self.flushes);
            let _ = writeln!(
                out,
                "  occupancy.mean         {:.2}",
                self.mean_shadow_occupancy()
            );
            let _ = writeln!(out, "{RULE}");
        }

        if want("release") {
            let _ = writeln!(out, "RELEASE QUEUE");
            let _ = writeln!(out, "  loads.deferred         {}", self.loads_deferred);
            let _ = writeln!(out, "  loads.released         {}", self.loads_released);
            let _ = writeln!(
                out,
                "  occupancy.mean         {:.2}",
                self.mean_release_occupancy()
            );
            let _ = writeln!(out, "{RULE}");
        }

        if want("tags") {
            let _ = writeln!(out, "TAG SET");
            let _ = writeln!(
                out,
                "  lookups: {:<10} | hits: {:<10} | misses: {:<10} | hit_rate: {:.2}%",
                self.tag_lookups,
                self.tag_hits,
                self.tag_misses(),
                self.tag_hit_rate() * 100.0
            );
            let _ = writeln!(out, "  inserts                {}", self.tag_inserts);
            let _ = writeln!(out, "{RULE}");
        }

        out
    }
}
