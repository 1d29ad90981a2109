use super::process::ProcessSpec;
use crate::{
    core::{
        SchedEvent,
        driver::SchedCore,
        state::{Pid, Process, Ticks},
    },
    scheduler::{FcfsScheduler, Policy, RoundRobinScheduler, Scheduler, SjfScheduler},
};

/// Final state of a run: the recorded timeline and every process record,
/// finished or not, in input order.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub policy: Policy,
    pub runfor: Ticks,
    pub timeline: Vec<SchedEvent>,
    pub processes: Vec<Process>,
}

impl Outcome {
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    pub fn process(&self, name: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.name == name)
    }
}

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    policy: Policy,
    // Pids sorted by arrival, input order within a tick
    arrivals: Vec<Pid>,
    arrival_cursor: usize,
    finished: usize,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(processes: Vec<ProcessSpec>, runfor: Ticks, policy: Policy) -> Self {
        let mut arrivals: Vec<Pid> = (0..processes.len()).collect();
        // Stable, so equal arrivals keep input order
        arrivals.sort_by_key(|&pid| processes[pid].arrival);

        let mut sim = Self {
            core: SchedCore::<S>::new(processes, runfor, policy),
            policy,
            arrivals,
            arrival_cursor: 0,
            finished: 0,
        };
        if runfor > 0 {
            sim.handle_arrivals();
        }
        sim
    }

    /// Advance the clock by one tick.
    pub fn step(&mut self) {
        debug_assert!(!self.is_done(), "stepped past the run length");
        self.core.tick();
        if S::FINISH_BEFORE_ARRIVALS {
            self.retire_finished();
        }
        // Arrivals at the final tick are never admitted: the run is over
        if !self.is_done() {
            self.handle_arrivals();
        }
        self.retire_finished();
        self.core.requeue_expired();
        self.core.observe();
    }

    fn retire_finished(&mut self) {
        if let Some(pid) = self.core.retire_finished() {
            self.finished += 1;
            log::trace!(
                "{} done, {}/{} finished",
                self.core.ctx.process(pid).name,
                self.finished,
                self.core.ctx.processes.len()
            );
        }
    }

    pub fn run(mut self) -> Outcome {
        log::info!(
            "simulating {} processes for {} ticks using {}",
            self.core.ctx.processes.len(),
            self.core.ctx.runfor,
            self.policy,
        );
        while !self.is_done() {
            self.step();
        }
        log::info!(
            "stopped at t={} after {} steps, {}/{} processes finished",
            self.core.now(),
            self.core.observer().steps(),
            self.finished_count(),
            self.core.ctx.processes.len()
        );
        self.into_outcome()
    }

    fn handle_arrivals(&mut self) {
        let now = self.core.now();
        while let Some(&pid) = self.arrivals.get(self.arrival_cursor) {
            // Contiguous, since arrivals are sorted
            if self.core.ctx.process(pid).arrival != now {
                debug_assert!(self.core.ctx.process(pid).arrival > now);
                break;
            }
            self.core.wake_process(pid);
            self.arrival_cursor += 1;
        }
    }

    pub fn is_done(&self) -> bool {
        self.core.now() >= self.core.ctx.runfor
    }

    pub fn finished_count(&self) -> usize {
        debug_assert_eq!(
            self.finished,
            self.core.ctx.processes.iter().filter(|p| p.is_finished()).count()
        );
        self.finished
    }

    pub fn into_outcome(self) -> Outcome {
        let ctx = self.core.ctx;
        Outcome {
            policy: self.policy,
            runfor: ctx.runfor,
            timeline: ctx.timeline,
            processes: ctx.processes,
        }
    }
}

/// Run a complete simulation under the given policy.
pub fn simulate(policy: Policy, runfor: Ticks, processes: Vec<ProcessSpec>) -> Outcome {
    match policy {
        Policy::Fcfs => Sim::<FcfsScheduler>::new(processes, runfor, policy).run(),
        Policy::Sjf => Sim::<SjfScheduler>::new(processes, runfor, policy).run(),
        Policy::RoundRobin { .. } => {
            Sim::<RoundRobinScheduler>::new(processes, runfor, policy).run()
        }
    }
}
