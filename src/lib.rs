//! Discrete-time simulation of a single CPU under FCFS, preemptive SJF and
//! Round-Robin scheduling, producing a tick-by-tick timeline and per-process
//! wait/turnaround/response figures.

pub mod core;
pub mod error;
pub mod input;
pub mod report;
pub mod scheduler;
pub mod sim;

pub use crate::core::SchedEvent;
pub use error::ParseError;
pub use input::{SimConfig, Workload};
pub use scheduler::{Policy, Scheduler};
pub use sim::{Outcome, ProcessSpec, Sim, Summary, simulate};
