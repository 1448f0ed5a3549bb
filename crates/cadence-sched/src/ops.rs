//! Deferred-mutation queue for in-tick registry changes

use crate::policy::TimingPolicy;
use crate::unit::Schedulable;
use cadence_core::UnitId;
use std::sync::Arc;

/// A pending registry mutation raised from inside a tick pass
pub enum PendingOp {
    Register {
        id: UnitId,
        unit: Box<dyn Schedulable>,
        policy: Arc<TimingPolicy>,
    },
    Unregister(UnitId),
    Reprioritize {
        id: UnitId,
        policy: Arc<TimingPolicy>,
    },
}

/// FIFO queue of registry mutations requested during an iteration pass.
///
/// The scheduler hands a `&mut ScheduleOps` into every `start_once` /
/// `on_tick` call and drains the queue once per tick, immediately after the
/// pass. Ops enqueued while the queue is being drained (for example from a
/// `start_once` fired by a drained register) land in the fresh queue and are
/// applied on the next tick.
#[derive(Default)]
pub struct ScheduleOps {
    pending: Vec<PendingOp>,
}

impl ScheduleOps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a registration. The unit's id is allocated up front so the
    /// caller can retain and share it before the registry entry exists.
    pub fn register(&mut self, unit: Box<dyn Schedulable>, policy: Arc<TimingPolicy>) -> UnitId {
        let id = UnitId::new();
        self.pending.push(PendingOp::Register { id, unit, policy });
        id
    }

    /// Queue a registration under the default every-tick policy
    pub fn register_default(&mut self, unit: Box<dyn Schedulable>) -> UnitId {
        self.register(unit, Arc::new(TimingPolicy::default()))
    }

    /// Queue a removal. Unknown ids become a no-op when applied.
    pub fn unregister(&mut self, id: UnitId) {
        self.pending.push(PendingOp::Unregister(id));
    }

    /// Queue a policy swap plus re-sort for `id`
    pub fn reprioritize(&mut self, id: UnitId, policy: Arc<TimingPolicy>) {
        self.pending.push(PendingOp::Reprioritize { id, policy });
    }

    /// Drain all pending ops, returning them in enqueue order
    pub fn drain(&mut self) -> Vec<PendingOp> {
        std::mem::take(&mut self.pending)
    }

    /// Check if there are pending ops
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of pending ops
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::Result;

    struct Noop;

    impl Schedulable for Noop {
        fn on_tick(&mut self, _dt: f64, _ops: &mut ScheduleOps) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "noop"
        }
    }

    #[test]
    fn test_push_and_drain() {
        let mut ops = ScheduleOps::new();
        assert!(ops.is_empty());

        let id = ops.register_default(Box::new(Noop));
        ops.unregister(id);
        assert_eq!(ops.len(), 2);

        let drained = ops.drain();
        assert_eq!(drained.len(), 2);
        assert!(ops.is_empty());
        assert!(matches!(drained[0], PendingOp::Register { .. }));
        assert!(matches!(drained[1], PendingOp::Unregister(got) if got == id));
    }

    #[test]
    fn test_drain_clears() {
        let mut ops = ScheduleOps::new();
        ops.register_default(Box::new(Noop));

        let _ = ops.drain();
        assert!(ops.drain().is_empty());
    }
}
