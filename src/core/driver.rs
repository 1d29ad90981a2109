use super::{
    event::SchedEvent,
    observer::Observer,
    state::{Pid, SchedCtx, Ticks},
};
use crate::scheduler::{Dispatch, EnqueueReason, Policy, Scheduler};
use crate::sim::ProcessSpec;

/// The single-CPU engine: owns the context and drives a [`Scheduler`].
///
/// A tick is split up so that arrivals can be slotted in between:
/// [`SchedCore::tick`] dispatches and executes one tick of CPU time, then the
/// caller admits the arrivals of the new tick around
/// [`SchedCore::retire_finished`], and finally [`SchedCore::requeue_expired`]
/// puts a process whose slice is over back behind them.
pub struct SchedCore<S: Scheduler> {
    pub ctx: SchedCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(processes: Vec<ProcessSpec>, runfor: Ticks, policy: Policy) -> Self {
        let mut ctx = SchedCtx::new(processes, runfor);
        let scheduler = S::init(&mut ctx, policy);
        let observer = Observer::new();
        Self {
            ctx,
            scheduler,
            observer,
        }
    }

    /// Execute one tick of CPU time, dispatching first if the CPU is idle.
    pub fn tick(&mut self) {
        if self.ctx.cpu_is_idle() {
            self.try_dispatch();
        }

        let Some(pid) = self.ctx.current else {
            let tick = self.ctx.now;
            self.ctx.record(SchedEvent::Idle { tick });
            self.ctx.advance_time(1);
            return;
        };

        let proc = self.ctx.process_mut(pid);
        proc.remaining = proc
            .remaining
            .checked_sub(1)
            .expect("Running process has no burst left");
        proc.consumed_slice += 1;

        self.ctx.advance_time(1);
    }

    /// Retire the running process if its burst is done. Returns the process
    /// that finished.
    pub fn retire_finished(&mut self) -> Option<Pid> {
        let pid = self.ctx.current?;
        if self.ctx.process(pid).remaining > 0 {
            return None;
        }

        let tick = self.ctx.now;
        let name = self.ctx.process(pid).name.clone();
        self.ctx.clear_cpu();
        self.ctx.mark_finished(pid, tick);
        log::debug!("t={tick} {name} finished");
        self.ctx.record(SchedEvent::Finished { tick, name });
        self.scheduler.stopping(&mut self.ctx, pid, false);
        Some(pid)
    }

    /// Hand the running process back to the scheduler if its slice ran out.
    pub fn requeue_expired(&mut self) {
        let Some(pid) = self.ctx.current else {
            return;
        };
        let proc = self.ctx.process(pid);
        debug_assert!(proc.remaining > 0, "{} requeued with no burst left", proc.name);
        let slice = proc
            .allocated_slice
            .expect("Running process must have a slice");
        if proc.consumed_slice < slice {
            return;
        }

        self.ctx.clear_cpu();
        self.ctx.mark_ready(pid);
        self.scheduler.stopping(&mut self.ctx, pid, true);
        self.scheduler
            .enqueue(&mut self.ctx, pid, EnqueueReason::SliceExpired);
    }

    fn try_dispatch(&mut self) {
        let Some(Dispatch {
            pid,
            slice,
            announce,
        }) = self.scheduler.dispatch(&mut self.ctx)
        else {
            return;
        };

        // Never plan past the remaining burst; the run-length cut is left to the clock
        let slice = slice.min(self.ctx.process(pid).remaining);
        let first = self.ctx.set_running(pid, slice);
        let proc = self.ctx.process(pid);
        if first {
            log::debug!(
                "t={} {} starts (response {})",
                self.ctx.now,
                proc.name,
                self.ctx.now - proc.arrival
            );
        }
        if announce {
            let event = SchedEvent::Selected {
                tick: self.ctx.now,
                name: proc.name.clone(),
                remaining: proc.remaining,
            };
            self.ctx.record(event);
        }
    }

    /// Admit a process that arrives at the current tick.
    pub fn wake_process(&mut self, pid: Pid) {
        self.ctx.mark_ready(pid);
        let event = SchedEvent::Arrived {
            tick: self.ctx.now,
            name: self.ctx.process(pid).name.clone(),
        };
        self.ctx.record(event);
        self.scheduler
            .enqueue(&mut self.ctx, pid, EnqueueReason::Arrival);
    }

    pub fn observe(&mut self) {
        self.observer.observe(&self.ctx);
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
