//! End-to-End Scenarios.
//!
//! Scripted stimuli run through the full simulator, checking the published
//! pointers, releases, and tag results cycle by cycle.

use pretty_assertions::assert_eq;

use shadowline_core::Simulator;
use shadowline_core::sim::Stimulus;

use crate::common::builder::CycleBuilder;
use crate::common::harness::{TestContext, small_config};

/// Three branches allocated at once and resolved oldest first, one per cycle.
/// The ring is empty again at the end of cycle 4.
#[test]
fn three_branches_resolve_in_order() {
    let mut config = small_config();
    config.shadow.width = 4;
    let mut ctx = TestContext::with_config(&config);

    let _ = ctx.step(CycleBuilder::new().branches(3));
    assert_eq!(ctx.shadow_pointers(), (0, 3));
    let _ = ctx.step(CycleBuilder::new().safe(0));
    let _ = ctx.step(CycleBuilder::new().safe(1));
    assert_eq!(ctx.shadow_pointers(), (1, 3));
    let _ = ctx.step(CycleBuilder::new().safe(2));
    let _ = ctx.step(CycleBuilder::new());
    assert_eq!(ctx.shadow_pointers(), (3, 3));

    let heads: Vec<usize> = ctx.history.iter().map(|o| o.unit.head).collect();
    assert_eq!(heads, vec![0, 0, 0, 1, 2]);
}

/// With two lanes the head retires at most two resolved slots per cycle.
#[test]
fn narrow_ring_retires_two_per_cycle() {
    let mut ctx = TestContext::new();
    let _ = ctx.step(CycleBuilder::new().branches(2));
    let _ = ctx.step(CycleBuilder::new().branches(2).safe(0).safe(1));
    let _ = ctx.step(CycleBuilder::new().safe(2).safe(3));
    assert_eq!(ctx.shadow_pointers(), (2, 4));
    ctx.idle(1);
    assert_eq!(ctx.shadow_pointers(), (4, 4));
}

/// Loads deferred behind a branch leave one per cycle, in order, after it resolves.
#[test]
fn deferred_loads_follow_their_branch() {
    let stimulus = Stimulus::from_json(
        r#"{
            "cycles": [
                { "unit": { "new_branches": [true] } },
                { "unit": { "enqueue": [100, 101] } },
                { "unit": { "enqueue": [102] } },
                { "unit": { "safe": [0] } }
            ],
            "drain": 6
        }"#,
    )
    .unwrap();
    let mut sim = Simulator::new(&small_config()).unwrap();
    let released: Vec<(u64, u64)> = sim
        .run(&stimulus)
        .iter()
        .filter_map(|o| o.unit.released_entry().map(|e| (o.cycle, e)))
        .collect();
    assert_eq!(released, vec![(5, 100), (6, 101), (7, 102)]);
    assert_eq!(sim.stats.loads_released, 3);
}

/// A misprediction rolls the ring back, reports the checkpoint a cycle later,
/// and the surviving older branch still gates its loads.
#[test]
fn rollback_then_recover() {
    let mut ctx = TestContext::new();
    let _ = ctx.step(CycleBuilder::new().branches(1));
    let _ = ctx.step(CycleBuilder::new().enqueue(1));
    let _ = ctx.step(CycleBuilder::new().branches(2));
    let _ = ctx.step(CycleBuilder::new().enqueue(2));
    assert_eq!(ctx.shadow_pointers(), (0, 3));

    let _ = ctx.step(CycleBuilder::new().mispredict(1));
    let out = ctx.step(CycleBuilder::new().branches(1));
    // Slot 1 was allocated when the release tail was 1.
    assert_eq!(out.unit.rollback, Some(1));
    assert_eq!(ctx.shadow_pointers(), (0, 2));
    assert_eq!(ctx.rollbacks(), vec![1]);

    // Load 1 is still held by slot 0; load 2 waits behind it.
    ctx.idle(2);
    assert_eq!(ctx.released(), Vec::<u64>::new());

    let _ = ctx.step(CycleBuilder::new().safe(0).safe(1));
    ctx.idle(4);
    assert_eq!(ctx.released(), vec![1, 2]);
    assert_eq!(ctx.shadow_pointers(), (2, 2));
}

/// Flushing both rings and the tag table in one cycle leaves nothing behind.
#[test]
fn global_flush() {
    let mut ctx = TestContext::new();
    let _ = ctx.step(CycleBuilder::new().branches(2).insert(0x44));
    let _ = ctx.step(CycleBuilder::new().enqueue(9).insert(0x45));
    let _ = ctx.step(CycleBuilder::new().flush().flush_tags());
    assert_eq!(ctx.shadow_pointers(), (0, 0));
    assert!(!ctx.sim.tags.contains(0x44));
    assert!(!ctx.lookup(0x45));

    ctx.idle(4);
    assert_eq!(ctx.released(), Vec::<u64>::new());
}

/// The tag set runs alongside the shadow unit without interaction.
#[test]
fn tags_track_inserted_addresses() {
    let mut ctx = TestContext::new();
    let _ = ctx.step(CycleBuilder::new().insert(0x100).insert(0x204));
    let _ = ctx.step(CycleBuilder::new().lookup(0x100).lookup(0x204).branches(1));
    let _ = ctx.step(CycleBuilder::new().lookup(0x300));
    let out = ctx.step(CycleBuilder::new());
    assert_eq!(out.tags.results, vec![Some(true), Some(true)]);
    let out = ctx.step(CycleBuilder::new());
    assert_eq!(out.tags.results, vec![Some(false), None]);
}
