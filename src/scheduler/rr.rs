use super::{Dispatch, EnqueueReason, Pid, Policy, SchedCtx, Scheduler};
use crate::core::{QueueId, Ticks};

/// Round-Robin over a single FIFO. Every dispatch is announced, including a
/// process picked again right after its own requeue.
pub struct RoundRobinScheduler {
    ready: QueueId,
    quantum: Ticks,
}

impl Scheduler for RoundRobinScheduler {
    const FINISH_BEFORE_ARRIVALS: bool = false;

    fn init(ctx: &mut SchedCtx, policy: Policy) -> Self {
        let Policy::RoundRobin { quantum } = policy else {
            unreachable!("round robin initialised with {policy:?}");
        };
        assert!(quantum > 0, "Round-Robin quantum must be positive");

        Self {
            ready: ctx.create_queue_fifo(),
            quantum,
        }
    }

    // Slice expiry is only handled once the arrivals of that tick are
    // queued, so a requeued process always lands behind them.
    fn enqueue(&mut self, ctx: &mut SchedCtx, pid: Pid, reason: EnqueueReason) {
        if reason == EnqueueReason::SliceExpired {
            log::debug!(
                "t={} requeue {} ({} left)",
                ctx.now,
                ctx.process(pid).name,
                ctx.process(pid).remaining
            );
        }
        ctx.queue_push_back(self.ready, pid);
    }

    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<Dispatch> {
        let pid = ctx.queue_pop(self.ready)?;
        Some(Dispatch {
            pid,
            slice: self.quantum,
            announce: true,
        })
    }
}
