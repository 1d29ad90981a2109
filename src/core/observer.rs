use super::state::{ProcessState, SchedCtx};

/// Cross-checks the context after every tick. All checks are debug
/// assertions, so release builds only pay for the step counter.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.step += 1;

        if let Some(pid) = ctx.current {
            let proc = ctx.process(pid);
            debug_assert_eq!(
                proc.state,
                ProcessState::Running,
                "current process {} must be Running",
                proc.name
            );
            debug_assert!(
                proc.remaining > 0,
                "current process {} has nothing left to run",
                proc.name
            );
        }

        for proc in &ctx.processes {
            debug_assert!(
                proc.remaining <= proc.burst,
                "Process {} remaining burst exceeds its total",
                proc.name
            );
            debug_assert_eq!(
                proc.completion_time.is_some(),
                proc.state == ProcessState::Finished,
                "Process {} completion time out of sync with its state",
                proc.name
            );
            if proc.state == ProcessState::Finished {
                debug_assert_eq!(proc.remaining, 0, "Finished process {} has work left", proc.name);
            }
            if proc.state == ProcessState::Running {
                debug_assert_eq!(
                    ctx.current,
                    Some(proc.id),
                    "Process {} is Running but not on the CPU",
                    proc.name
                );
            }
            if proc.state == ProcessState::Ready {
                debug_assert!(
                    ctx.proc_in_any_queue(proc.id),
                    "Ready process {} is not queued",
                    proc.name
                );
            }
            if proc.served() > 0 {
                debug_assert!(
                    proc.start_time.is_some(),
                    "Process {} ran without a start time",
                    proc.name
                );
            }
        }

        for (&pid, &queue_id) in &ctx.proc_to_queue {
            let proc = ctx.process(pid);
            debug_assert_eq!(
                proc.state,
                ProcessState::Ready,
                "Process {} in queue {queue_id:?} is not Ready",
                proc.name
            );
            if let Some(queue) = ctx.queues.get(queue_id) {
                debug_assert!(
                    queue.contains(pid),
                    "proc_to_queue claims {} in queue {queue_id:?}, but queue does not contain it",
                    proc.name
                );
            } else {
                debug_assert!(false, "proc_to_queue references unknown queue {queue_id:?}");
            }
        }

        debug_assert_eq!(
            ctx.queues.values().map(|q| q.len()).sum::<usize>(),
            ctx.proc_to_queue.len(),
            "queue contents out of sync with proc_to_queue"
        );

        log::trace!(
            "observed step {} at t={} ({} queued)",
            self.step,
            ctx.now,
            ctx.proc_to_queue.len()
        );
    }
}
