use super::{Dispatch, EnqueueReason, Pid, Policy, SchedCtx, Scheduler};
use crate::core::QueueId;

/// Non-preemptive first-come-first-served: the head of the FIFO runs until
/// its burst is exhausted.
pub struct FcfsScheduler {
    ready: QueueId,
}

impl Scheduler for FcfsScheduler {
    fn init(ctx: &mut SchedCtx, _policy: Policy) -> Self {
        Self {
            ready: ctx.create_queue_fifo(),
        }
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, pid: Pid, reason: EnqueueReason) {
        debug_assert_eq!(
            reason,
            EnqueueReason::Arrival,
            "FCFS never hands out a slice shorter than the burst"
        );
        ctx.queue_push_back(self.ready, pid);
    }

    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<Dispatch> {
        let pid = ctx.queue_pop(self.ready)?;
        Some(Dispatch {
            pid,
            slice: ctx.process(pid).remaining,
            announce: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ProcessSpec;

    #[test]
    fn dispatches_in_arrival_order_for_the_whole_burst() {
        let specs = vec![ProcessSpec::new("A", 0, 4), ProcessSpec::new("B", 0, 2)];
        let mut ctx = SchedCtx::new(specs, 10);
        let mut fcfs = FcfsScheduler::init(&mut ctx, Policy::Fcfs);
        for pid in 0..2 {
            ctx.mark_ready(pid);
            fcfs.enqueue(&mut ctx, pid, EnqueueReason::Arrival);
        }

        let first = fcfs.dispatch(&mut ctx).expect("queue has two processes");
        assert_eq!((first.pid, first.slice, first.announce), (0, 4, true));
        let second = fcfs.dispatch(&mut ctx).expect("queue has one process");
        assert_eq!((second.pid, second.slice), (1, 2));
        assert_eq!(fcfs.dispatch(&mut ctx), None);
    }
}
