use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::cmp::Ordering;
use std::collections::VecDeque;

use super::event::SchedEvent;
use crate::sim::ProcessSpec;

// Index into the process Vec, which keeps input order
pub type Pid = usize;
pub type Ticks = u64;
new_key_type! {
    pub struct QueueId;
}

/// Ordering key of a process in a ranked ready queue: least remaining burst
/// first, then earliest admission.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct Rank {
    pub remaining: Ticks,
    pub seq: u64,
}

// KeyedPriorityQueue is a max-heap, so the "smallest" rank must compare greatest
impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .remaining
            .cmp(&self.remaining)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Pending,
    Ready,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Process {
    pub id: Pid,
    pub name: String,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub remaining: Ticks,
    pub state: ProcessState,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub allocated_slice: Option<Ticks>,
    pub consumed_slice: Ticks,
    // Set on arrival; ties in ranked queues fall back to it
    pub admission_seq: Option<u64>,
}

impl Process {
    /// CPU ticks this process has received so far.
    pub fn served(&self) -> Ticks {
        self.burst - self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.state == ProcessState::Finished
    }
}

#[derive(Debug)]
pub enum ReadyQueue {
    Fifo {
        procs: VecDeque<Pid>,
    },
    Ranked {
        procs: KeyedPriorityQueue<Pid, Rank>,
    },
}

impl ReadyQueue {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            procs: VecDeque::new(),
        }
    }

    pub fn new_ranked() -> Self {
        Self::Ranked {
            procs: KeyedPriorityQueue::new(),
        }
    }

    pub fn contains(&self, pid: Pid) -> bool {
        match self {
            Self::Fifo { procs } => procs.contains(&pid),
            Self::Ranked { procs } => procs.get_priority(&pid).is_some(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Fifo { procs } => procs.len(),
            Self::Ranked { procs } => procs.len(),
        }
    }
}

/// Everything the engine and the schedulers share: the clock, the process
/// table, the ready queues and the timeline being recorded.
#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub runfor: Ticks,
    pub current: Option<Pid>,
    pub processes: Vec<Process>,
    pub queues: SlotMap<QueueId, ReadyQueue>,
    pub proc_to_queue: FxHashMap<Pid, QueueId>,
    pub timeline: Vec<SchedEvent>,

    // Increment upon admission
    next_seq: u64,
}

impl SchedCtx {
    pub fn new(specs: Vec<ProcessSpec>, runfor: Ticks) -> Self {
        let processes = specs
            .into_iter()
            .enumerate()
            .map(|(id, spec)| {
                assert!(spec.burst > 0, "Process {} has an empty burst", spec.name);
                Process {
                    id,
                    name: spec.name,
                    arrival: spec.arrival,
                    burst: spec.burst,
                    remaining: spec.burst,
                    state: ProcessState::Pending,
                    start_time: None,
                    completion_time: None,
                    allocated_slice: None,
                    consumed_slice: 0,
                    admission_seq: None,
                }
            })
            .collect();

        Self {
            now: 0,
            runfor,
            current: None,
            processes,
            queues: SlotMap::with_key(),
            proc_to_queue: FxHashMap::default(),
            timeline: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn record(&mut self, event: SchedEvent) {
        log::trace!("{event}");
        self.timeline.push(event);
    }

    pub fn create_queue_fifo(&mut self) -> QueueId {
        self.queues.insert(ReadyQueue::new_fifo())
    }

    pub fn create_queue_ranked(&mut self) -> QueueId {
        self.queues.insert(ReadyQueue::new_ranked())
    }

    fn queue_mut(&mut self, queue_id: QueueId) -> &mut ReadyQueue {
        self.queues.get_mut(queue_id).expect("Unknown ready queue")
    }

    fn queue_push(&mut self, queue_id: QueueId, pid: Pid) {
        assert!(
            !self.proc_to_queue.contains_key(&pid),
            "Process {pid} already present in some ready queue"
        );

        let proc = self.process(pid);
        debug_assert_eq!(
            proc.state,
            ProcessState::Ready,
            "Process {pid} must be Ready when enqueued"
        );
        let rank = Rank {
            remaining: proc.remaining,
            seq: proc
                .admission_seq
                .expect("Enqueued process was never admitted"),
        };

        match self.queue_mut(queue_id) {
            ReadyQueue::Fifo { procs } => procs.push_back(pid),
            ReadyQueue::Ranked { procs } => {
                procs.push(pid, rank);
            }
        };

        self.proc_to_queue.insert(pid, queue_id);
    }

    /// Append to the tail of a FIFO queue.
    pub fn queue_push_back(&mut self, queue_id: QueueId, pid: Pid) {
        debug_assert!(
            matches!(self.queues.get(queue_id), Some(ReadyQueue::Fifo { .. })),
            "queue_push_back on a ranked queue"
        );
        self.queue_push(queue_id, pid);
    }

    /// Insert into a ranked queue, keyed by the current remaining burst.
    pub fn queue_push_ranked(&mut self, queue_id: QueueId, pid: Pid) {
        debug_assert!(
            matches!(self.queues.get(queue_id), Some(ReadyQueue::Ranked { .. })),
            "queue_push_ranked on a FIFO queue"
        );
        self.queue_push(queue_id, pid);
    }

    pub fn queue_pop(&mut self, queue_id: QueueId) -> Option<Pid> {
        let queue = self.queues.get_mut(queue_id)?;
        let pid = match queue {
            ReadyQueue::Fifo { procs } => procs.pop_front(),
            ReadyQueue::Ranked { procs } => procs.pop().map(|entry| entry.0),
        }?;

        let removed = self.proc_to_queue.remove(&pid);
        debug_assert!(removed.is_some(), "Process {pid} missing queue membership");

        Some(pid)
    }

    /// Take a specific process out of a queue. Returns false if it was not there.
    pub fn queue_remove(&mut self, queue_id: QueueId, pid: Pid) -> bool {
        let removed = match self.queue_mut(queue_id) {
            ReadyQueue::Fifo { procs } => match procs.iter().position(|&p| p == pid) {
                Some(index) => procs.remove(index).is_some(),
                None => false,
            },
            ReadyQueue::Ranked { procs } => procs.remove(&pid).is_some(),
        };

        if removed {
            self.proc_to_queue.remove(&pid);
        }
        removed
    }

    /// Head of a queue without removing it; ranked queues also report the rank.
    pub fn queue_peek(&self, queue_id: QueueId) -> Option<(Pid, Option<Rank>)> {
        match self.queues.get(queue_id)? {
            ReadyQueue::Fifo { procs } => procs.front().map(|&pid| (pid, None)),
            ReadyQueue::Ranked { procs } => procs.peek().map(|(&pid, &rank)| (pid, Some(rank))),
        }
    }

    pub fn queue_rank(&self, queue_id: QueueId, pid: Pid) -> Option<Rank> {
        match self.queues.get(queue_id)? {
            ReadyQueue::Fifo { .. } => None,
            ReadyQueue::Ranked { procs } => procs.get_priority(&pid).copied(),
        }
    }

    pub fn proc_in_any_queue(&self, pid: Pid) -> bool {
        self.proc_to_queue.contains_key(&pid)
    }

    pub fn process(&self, pid: Pid) -> &Process {
        &self.processes[pid]
    }

    pub fn process_mut(&mut self, pid: Pid) -> &mut Process {
        &mut self.processes[pid]
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Pending -> Ready on arrival, Running -> Ready on preemption.
    pub fn mark_ready(&mut self, pid: Pid) {
        let seq = self.next_seq;
        let proc = self.process_mut(pid);
        debug_assert!(
            proc.state != ProcessState::Finished,
            "Finished process {} cannot become ready",
            proc.name
        );

        if proc.admission_seq.is_none() {
            proc.admission_seq = Some(seq);
            self.next_seq += 1;
        }
        let proc = self.process_mut(pid);
        proc.state = ProcessState::Ready;
        proc.allocated_slice = None;
        proc.consumed_slice = 0;
    }

    // Return true if this is the first dispatch of the process
    pub fn set_running(&mut self, pid: Pid, slice: Ticks) -> bool {
        debug_assert!(
            !self.proc_to_queue.contains_key(&pid),
            "Running process {pid} must not be enqueued"
        );
        assert!(self.current.is_none(), "CPU already running a process");
        assert!(slice > 0, "Dispatch slice must be positive");

        let now = self.now;
        self.current = Some(pid);
        let proc = self.process_mut(pid);
        assert_eq!(
            proc.state,
            ProcessState::Ready,
            "Process {} dispatched while not ready",
            proc.name
        );
        proc.state = ProcessState::Running;
        proc.allocated_slice = Some(slice);
        proc.consumed_slice = 0;

        let first = proc.start_time.is_none();
        if first {
            proc.start_time = Some(now);
        }
        first
    }

    pub fn mark_finished(&mut self, pid: Pid, completion_time: Ticks) {
        debug_assert!(
            !self.proc_to_queue.contains_key(&pid),
            "Finishing process {pid} that is still enqueued"
        );

        let proc = &mut self.processes[pid];
        debug_assert_eq!(
            proc.state,
            ProcessState::Running,
            "Process {} must have been running before it finishes",
            proc.name
        );
        assert_eq!(proc.remaining, 0, "Process {} finished early", proc.name);
        assert!(
            proc.completion_time.is_none(),
            "Process {} finished twice",
            proc.name
        );

        proc.state = ProcessState::Finished;
        proc.allocated_slice = None;
        proc.completion_time = Some(completion_time);
    }

    pub fn clear_cpu(&mut self) {
        self.current = None;
    }
}
