use super::{Dispatch, EnqueueReason, Pid, Policy, SchedCtx, Scheduler};
use crate::core::QueueId;

/// Preemptive shortest-job-first (shortest remaining time).
///
/// Every dispatch lasts one tick, so the choice is revisited each tick. The
/// process that ran last keeps the CPU on a tie; otherwise the earliest
/// admitted process among the shortest wins.
pub struct SjfScheduler {
    ready: QueueId,
    last_selected: Option<Pid>,
}

impl Scheduler for SjfScheduler {
    fn init(ctx: &mut SchedCtx, _policy: Policy) -> Self {
        Self {
            ready: ctx.create_queue_ranked(),
            last_selected: None,
        }
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, pid: Pid, _reason: EnqueueReason) {
        ctx.queue_push_ranked(self.ready, pid);
    }

    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<Dispatch> {
        let Some((head, head_rank)) = ctx.queue_peek(self.ready) else {
            self.last_selected = None;
            return None;
        };
        let shortest = head_rank.expect("SJF queue is ranked").remaining;

        let pid = match self.last_selected {
            Some(last)
                if ctx
                    .queue_rank(self.ready, last)
                    .is_some_and(|rank| rank.remaining == shortest) =>
            {
                last
            }
            _ => head,
        };
        let removed = ctx.queue_remove(self.ready, pid);
        debug_assert!(removed, "SJF picked a process outside its queue");

        let announce = self.last_selected != Some(pid);
        if announce && let Some(prev) = self.last_selected {
            log::debug!(
                "t={} {} preempts {} ({} < {})",
                ctx.now,
                ctx.process(pid).name,
                ctx.process(prev).name,
                ctx.process(pid).remaining,
                ctx.process(prev).remaining
            );
        }
        self.last_selected = Some(pid);

        Some(Dispatch {
            pid,
            slice: 1,
            announce,
        })
    }

    fn stopping(&mut self, _ctx: &mut SchedCtx, pid: Pid, runnable: bool) {
        // A finished process forgets the selection so the successor is announced
        if !runnable && self.last_selected == Some(pid) {
            self.last_selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ProcessSpec;

    fn admit_all(ctx: &mut SchedCtx, sjf: &mut SjfScheduler) {
        for pid in 0..ctx.processes.len() {
            ctx.mark_ready(pid);
            sjf.enqueue(ctx, pid, EnqueueReason::Arrival);
        }
    }

    // Simulate one tick of service and hand the process back
    fn run_one_tick(ctx: &mut SchedCtx, sjf: &mut SjfScheduler, pid: Pid) {
        ctx.process_mut(pid).remaining -= 1;
        ctx.mark_ready(pid);
        sjf.stopping(ctx, pid, true);
        sjf.enqueue(ctx, pid, EnqueueReason::SliceExpired);
    }

    #[test]
    fn picks_shortest_and_announces_only_on_change() {
        let specs = vec![ProcessSpec::new("A", 0, 6), ProcessSpec::new("B", 0, 2)];
        let mut ctx = SchedCtx::new(specs, 10);
        let mut sjf = SjfScheduler::init(&mut ctx, Policy::Sjf);
        admit_all(&mut ctx, &mut sjf);

        let first = sjf.dispatch(&mut ctx).expect("queue not empty");
        assert_eq!((first.pid, first.slice, first.announce), (1, 1, true));
        run_one_tick(&mut ctx, &mut sjf, 1);

        let second = sjf.dispatch(&mut ctx).expect("queue not empty");
        assert_eq!((second.pid, second.announce), (1, false));
    }

    #[test]
    fn running_process_wins_a_tie() {
        // B was admitted after A but ran last; after one tick both have 3 left
        let specs = vec![ProcessSpec::new("A", 0, 3), ProcessSpec::new("B", 0, 4)];
        let mut ctx = SchedCtx::new(specs, 10);
        let mut sjf = SjfScheduler::init(&mut ctx, Policy::Sjf);
        admit_all(&mut ctx, &mut sjf);
        assert!(ctx.queue_remove(sjf.ready, 1));
        sjf.last_selected = Some(1);
        run_one_tick(&mut ctx, &mut sjf, 1);

        let next = sjf.dispatch(&mut ctx).expect("queue not empty");
        assert_eq!((next.pid, next.announce), (1, false));
    }

    #[test]
    fn tie_between_waiting_processes_goes_to_earliest_admission() {
        let specs = vec![
            ProcessSpec::new("late", 0, 3),
            ProcessSpec::new("early", 0, 3),
        ];
        let mut ctx = SchedCtx::new(specs, 10);
        let mut sjf = SjfScheduler::init(&mut ctx, Policy::Sjf);
        for pid in [1, 0] {
            ctx.mark_ready(pid);
            sjf.enqueue(&mut ctx, pid, EnqueueReason::Arrival);
        }

        assert_eq!(sjf.dispatch(&mut ctx).map(|d| d.pid), Some(1));
    }

    #[test]
    fn finishing_resets_selection_tracking() {
        let specs = vec![ProcessSpec::new("A", 0, 1)];
        let mut ctx = SchedCtx::new(specs, 10);
        let mut sjf = SjfScheduler::init(&mut ctx, Policy::Sjf);
        admit_all(&mut ctx, &mut sjf);

        sjf.dispatch(&mut ctx).expect("queue not empty");
        sjf.stopping(&mut ctx, 0, false);
        assert_eq!(sjf.last_selected, None);
        assert_eq!(sjf.dispatch(&mut ctx), None);
    }
}
