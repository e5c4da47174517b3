//! Shadow unit: the shadow ring and release queue clocked together.
//!
//! The two rings couple only through the shadow ring's published pointers and
//! the release queue's tail:
//! 1. The release queue tests and stamps against the shadow `head`/`tail`
//!    registered at the start of the cycle, so a branch resolved in cycle `t`
//!    cannot release a load before cycle `t + 2`.
//! 2. Each branch allocated in a cycle records the release queue tail registered
//!    at the start of that cycle as its checkpoint.

use crate::config::Config;
use crate::core::pipeline::release::ReleaseQueue;
use crate::core::pipeline::shadow::ShadowTracker;
use crate::core::pipeline::signals::{UnitInputs, UnitOutputs};
use crate::core::pipeline::traits::RingBuffer;

/// Shadow ring and release queue advanced in lock step.
#[derive(Clone, Debug)]
pub struct ShadowUnit {
    /// Branch shadow ring.
    pub shadow: ShadowTracker,
    /// Deferred load releases.
    pub release: ReleaseQueue,
}

impl ShadowUnit {
    /// Creates an empty unit sized from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            shadow: ShadowTracker::from_config(&config.shadow),
            release: ReleaseQueue::from_config(config),
        }
    }

    /// Advances both rings by one cycle.
    pub fn tick(&mut self, input: &UnitInputs) -> UnitOutputs {
        let published = self.shadow.pointers();
        let checkpoint = self.release.tail() as u64;

        let released = self.release.step(&input.enqueue, input.flush, &published);
        let shadow = self.shadow.step(
            &input.new_branches,
            checkpoint,
            &input.safe,
            input.mispredict,
            input.flush,
        );

        UnitOutputs {
            head: shadow.head,
            tail: shadow.tail,
            rollback: shadow.release,
            released: released.lanes,
        }
    }

    /// Resets both rings.
    pub fn flush(&mut self) {
        self.shadow.flush();
        self.release.flush();
    }
}
