use crate::core::state::Ticks;

/// Static description of a process, as read from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub name: String,
    pub arrival: Ticks,
    pub burst: Ticks,
}

impl ProcessSpec {
    pub fn new(name: impl Into<String>, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
        }
    }
}
