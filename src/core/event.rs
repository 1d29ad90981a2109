use std::fmt;

use crate::core::Ticks;

/// One entry of the simulation timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    Arrived {
        tick: Ticks,
        name: String,
    },
    // Remaining burst at the moment of dispatch
    Selected {
        tick: Ticks,
        name: String,
        remaining: Ticks,
    },
    Finished {
        tick: Ticks,
        name: String,
    },
    // Nothing was dispatched this tick
    Idle {
        tick: Ticks,
    },
}

impl SchedEvent {
    pub fn tick(&self) -> Ticks {
        match self {
            Self::Arrived { tick, .. }
            | Self::Selected { tick, .. }
            | Self::Finished { tick, .. }
            | Self::Idle { tick } => *tick,
        }
    }

    pub fn process(&self) -> Option<&str> {
        match self {
            Self::Arrived { name, .. } | Self::Selected { name, .. } | Self::Finished { name, .. } => {
                Some(name)
            }
            Self::Idle { .. } => None,
        }
    }
}

impl fmt::Display for SchedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arrived { tick, name } => write!(f, "Time {tick:3} : {name} arrived"),
            Self::Selected {
                tick,
                name,
                remaining,
            } => write!(f, "Time {tick:3} : {name} selected (burst {remaining:3})"),
            Self::Finished { tick, name } => write!(f, "Time {tick:3} : {name} finished"),
            Self::Idle { tick } => write!(f, "Time {tick:3} : Idle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_timeline_lines() {
        let arrived = SchedEvent::Arrived {
            tick: 0,
            name: "A".into(),
        };
        let selected = SchedEvent::Selected {
            tick: 12,
            name: "A".into(),
            remaining: 5,
        };
        assert_eq!(arrived.to_string(), "Time   0 : A arrived");
        assert_eq!(selected.to_string(), "Time  12 : A selected (burst   5)");
        assert_eq!(SchedEvent::Idle { tick: 7 }.to_string(), "Time   7 : Idle");
        assert_eq!(SchedEvent::Idle { tick: 7 }.process(), None);
    }
}
