use average::{Estimate, Mean};

use super::driver::Outcome;
use crate::core::state::{Process, Ticks};

/// Per-process figures derived from a finished process record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMetrics {
    pub name: String,
    pub wait: Ticks,
    pub turnaround: Ticks,
    pub response: Ticks,
}

impl ProcessMetrics {
    /// `None` for processes that never completed.
    pub fn from_process(proc: &Process) -> Option<Self> {
        let completion = proc.completion_time?;
        let start = proc
            .start_time
            .expect("Finished process was never dispatched");

        let turnaround = completion - proc.arrival;
        let wait = turnaround
            .checked_sub(proc.burst)
            .expect("Turnaround shorter than the burst");
        let response = start - proc.arrival;
        debug_assert!(response <= wait, "{} responded after waiting", proc.name);

        Some(Self {
            name: proc.name.clone(),
            wait,
            turnaround,
            response,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    // Every known process, arrived or not
    pub process_count: usize,
    // Finished processes, by name
    pub rows: Vec<ProcessMetrics>,
    // Processes without a completion time, by name
    pub unfinished: Vec<String>,
}

impl Summary {
    pub fn from_processes(processes: &[Process]) -> Self {
        let mut rows: Vec<ProcessMetrics> = processes
            .iter()
            .filter_map(ProcessMetrics::from_process)
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));

        let mut unfinished: Vec<String> = processes
            .iter()
            .filter(|p| p.completion_time.is_none())
            .map(|p| p.name.clone())
            .collect();
        unfinished.sort();

        Self {
            process_count: processes.len(),
            rows,
            unfinished,
        }
    }

    pub fn row(&self, name: &str) -> Option<&ProcessMetrics> {
        self.rows.iter().find(|r| r.name == name)
    }

    pub fn mean_wait(&self) -> Option<f64> {
        self.mean_of(|r| r.wait)
    }

    pub fn mean_turnaround(&self) -> Option<f64> {
        self.mean_of(|r| r.turnaround)
    }

    pub fn mean_response(&self) -> Option<f64> {
        self.mean_of(|r| r.response)
    }

    fn mean_of(&self, field: impl Fn(&ProcessMetrics) -> Ticks) -> Option<f64> {
        if self.rows.is_empty() {
            return None;
        }
        let mean: Mean = self.rows.iter().map(|r| field(r) as f64).collect();
        Some(mean.estimate())
    }
}

impl Outcome {
    pub fn summary(&self) -> Summary {
        Summary::from_processes(&self.processes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ProcessState;

    fn finished(name: &str, arrival: Ticks, burst: Ticks, start: Ticks, done: Ticks) -> Process {
        Process {
            id: 0,
            name: name.into(),
            arrival,
            burst,
            remaining: 0,
            state: ProcessState::Finished,
            start_time: Some(start),
            completion_time: Some(done),
            allocated_slice: None,
            consumed_slice: 0,
            admission_seq: Some(0),
        }
    }

    #[test]
    fn derives_wait_turnaround_response() {
        let metrics = ProcessMetrics::from_process(&finished("A", 2, 3, 4, 9)).expect("finished");
        assert_eq!(metrics.turnaround, 7);
        assert_eq!(metrics.wait, 4);
        assert_eq!(metrics.response, 2);
    }

    #[test]
    fn rows_sorted_by_name_and_unfinished_listed() {
        let mut pending = finished("Z", 50, 3, 0, 0);
        pending.state = ProcessState::Pending;
        pending.remaining = 3;
        pending.start_time = None;
        pending.completion_time = None;

        let processes = vec![
            finished("b", 0, 2, 0, 2),
            pending,
            finished("a", 0, 2, 2, 4),
        ];
        let summary = Summary::from_processes(&processes);

        assert_eq!(summary.process_count, 3);
        let names: Vec<&str> = summary.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(summary.unfinished, ["Z"]);
        assert_eq!(summary.mean_wait(), Some(1.0));
        assert_eq!(summary.mean_response(), Some(1.0));
        assert_eq!(summary.mean_turnaround(), Some(3.0));
    }

    #[test]
    fn no_means_without_finished_processes() {
        let summary = Summary::from_processes(&[]);
        assert_eq!(summary.mean_wait(), None);
        assert!(summary.rows.is_empty());
    }
}
