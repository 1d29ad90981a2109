pub mod fcfs;
pub mod rr;
pub mod sjf;

use std::fmt;

use crate::core::{
    Ticks,
    state::{Pid, SchedCtx},
};
pub use fcfs::FcfsScheduler;
pub use rr::RoundRobinScheduler;
pub use sjf::SjfScheduler;

/// Why a process is being handed to [`Scheduler::enqueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueReason {
    Arrival,
    // Dispatch slice ran out before the burst did
    SliceExpired,
}

/// A scheduler's answer to "what runs now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub pid: Pid,
    // Upper bound on consecutive ticks before the scheduler is consulted again
    pub slice: Ticks,
    // Whether the dispatch shows up as a "selected" event
    pub announce: bool,
}

/// Runtime choice of scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Sjf,
    RoundRobin { quantum: Ticks },
}

impl Policy {
    pub fn quantum(&self) -> Option<Ticks> {
        match self {
            Self::RoundRobin { quantum } => Some(*quantum),
            Self::Fcfs | Self::Sjf => None,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fcfs => "First Come First Served",
            Self::Sjf => "preemptive Shortest Job First",
            Self::RoundRobin { .. } => "Round-Robin",
        })
    }
}

pub trait Scheduler {
    /// Whether a completion is reported ahead of the arrivals of the tick it
    /// lands on. Policies that report a whole multi-tick slice at once list
    /// the arrivals seen during the slice first.
    const FINISH_BEFORE_ARRIVALS: bool = true;

    fn init(ctx: &mut SchedCtx, policy: Policy) -> Self;

    /// Put a Ready process into the scheduler's queue.
    fn enqueue(&mut self, ctx: &mut SchedCtx, pid: Pid, reason: EnqueueReason);

    /// Pick the next process to run on an idle CPU; `None` leaves it idle.
    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<Dispatch>;

    /// The running process left the CPU, either finished or about to be requeued.
    fn stopping(&mut self, _ctx: &mut SchedCtx, _pid: Pid, _runnable: bool) {}
}
