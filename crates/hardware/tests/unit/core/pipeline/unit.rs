//! Shadow Unit Coupling Tests.
//!
//! Verifies the one-cycle skew between the shadow ring and the release queue,
//! and what happens to deferred loads whose stamps refer to slots discarded
//! by a rollback.

use pretty_assertions::assert_eq;

use shadowline_core::core::pipeline::traits::RingBuffer;

use crate::common::builder::CycleBuilder;
use crate::common::harness::TestContext;

/// A branch resolved in cycle `t` releases a load it shadows in `t + 2`.
#[test]
fn safe_to_release_latency_is_two_cycles() {
    let mut ctx = TestContext::new();
    let _ = ctx.step(CycleBuilder::new().branches(1));
    let _ = ctx.step(CycleBuilder::new().enqueue(3));
    let _ = ctx.step(CycleBuilder::new().safe(0));
    let t = ctx.history.len() - 1;
    ctx.idle(2);
    assert_eq!(ctx.history[t + 1].unit.released_entry(), None);
    assert_eq!(ctx.history[t + 2].unit.released_entry(), Some(3));
}

/// A load enqueued alongside new branches is stamped against the tail before them.
#[test]
fn same_cycle_branch_does_not_shadow_load() {
    let mut ctx = TestContext::new();
    let _ = ctx.step(CycleBuilder::new().branches(2).enqueue(8));
    let out = ctx.step(CycleBuilder::new());
    assert_eq!(out.unit.released_entry(), Some(8));
    assert_eq!(ctx.sim.unit.shadow.occupancy(), 2);
}

#[test]
fn branches_record_release_tail_as_checkpoint() {
    let mut ctx = TestContext::new();
    let _ = ctx.step(CycleBuilder::new().enqueue(1).enqueue(2));
    let _ = ctx.step(CycleBuilder::new().branches(2).enqueue(3));
    let shadow = &ctx.sim.unit.shadow;
    assert_eq!(shadow.checkpoint(0), 2);
    assert_eq!(shadow.checkpoint(1), 2);
}

/// A wrong-path load stamped with the mispredicted slot becomes releasable as
/// soon as the rollback retracts the tail, even though an older branch is
/// still unresolved. The same cycle reports the rollback checkpoint that
/// identifies it as younger than the mispredicted branch.
#[test]
fn wrong_path_load_leaves_with_rollback() {
    let mut ctx = TestContext::new();
    let _ = ctx.step(CycleBuilder::new().branches(2));
    let _ = ctx.step(CycleBuilder::new().enqueue(40));
    let out = ctx.step(CycleBuilder::new().mispredict(1));
    assert_eq!(out.unit.released_entry(), None);

    let out = ctx.step(CycleBuilder::new());
    assert_eq!(out.unit.released_entry(), Some(40));
    assert_eq!(out.unit.rollback, Some(0));
    assert!(ctx.sim.unit.shadow.is_shadowed(0));
}

/// A stamp that refers to a rolled-back slot which is then reallocated waits
/// for the new branch. Reuse can delay a release but never hasten one.
#[test]
fn reallocated_slot_delays_stale_entry() {
    let mut ctx = TestContext::new();
    let _ = ctx.step(CycleBuilder::new().branches(1));
    // Stamped with slot 0.
    let _ = ctx.step(CycleBuilder::new().branches(1).enqueue(10));
    // Stamped with slot 1.
    let _ = ctx.step(CycleBuilder::new().enqueue(11));
    let _ = ctx.step(CycleBuilder::new().mispredict(1));
    let _ = ctx.step(CycleBuilder::new().branches(1));
    assert_eq!(ctx.shadow_pointers(), (0, 2));

    let _ = ctx.step(CycleBuilder::new().safe(0));
    ctx.idle(1);
    let out = ctx.step(CycleBuilder::new());
    assert_eq!(out.unit.released_entry(), Some(10));

    let out = ctx.step(CycleBuilder::new().safe(1));
    assert_eq!(out.unit.released_entry(), None);
    let out = ctx.step(CycleBuilder::new());
    assert_eq!(out.unit.released_entry(), None);
    let out = ctx.step(CycleBuilder::new());
    assert_eq!(out.unit.released_entry(), Some(11));
    assert_eq!(ctx.released(), vec![10, 11]);
}

#[test]
fn flush_clears_pending_rollback() {
    let mut ctx = TestContext::new();
    let _ = ctx.step(CycleBuilder::new().branches(2));
    let _ = ctx.step(CycleBuilder::new().mispredict(1).flush());
    let out = ctx.step(CycleBuilder::new());
    assert_eq!(out.unit.rollback, None);
    assert_eq!(ctx.shadow_pointers(), (0, 0));
}

#[test]
fn unit_flush_twice_equals_flush_once() {
    let mut ctx = TestContext::new();
    let _ = ctx.step(CycleBuilder::new().branches(2).enqueue(1));
    let _ = ctx.step(CycleBuilder::new().enqueue(2));
    ctx.sim.unit.flush();
    let once = format!("{:?}", ctx.sim.unit);
    ctx.sim.unit.flush();
    assert_eq!(format!("{:?}", ctx.sim.unit), once);
}
