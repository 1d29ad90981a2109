//! Reader for the line-oriented scheduler input format:
//!
//! ```text
//! processcount 2
//! runfor 10
//! use rr
//! quantum 2
//! process name A arrival 0 burst 5
//! process name B arrival 1 burst 3
//! end
//! ```
//!
//! Blank lines and lines starting with `#` are skipped, extra tokens after a
//! directive's value are ignored, and so is anything after `end`.

use rustc_hash::FxHashSet;
use std::str::FromStr;

use crate::{
    core::Ticks,
    error::ParseError,
    scheduler::Policy,
    sim::{Outcome, ProcessSpec, simulate},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub runfor: Ticks,
    pub policy: Policy,
    // `processcount` as written in the file, if present
    pub declared_count: Option<usize>,
}

/// A validated input description, ready to simulate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub config: SimConfig,
    pub processes: Vec<ProcessSpec>,
}

impl Workload {
    pub fn simulate(self) -> Outcome {
        simulate(self.config.policy, self.config.runfor, self.processes)
    }
}

impl FromStr for Workload {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse(text)
    }
}

/// Build a policy from its keyword; `rr` requires a positive quantum.
pub fn parse_policy(keyword: &str, quantum: Option<Ticks>) -> Result<Policy, ParseError> {
    match keyword {
        "fcfs" => Ok(Policy::Fcfs),
        "sjf" => Ok(Policy::Sjf),
        "rr" => match quantum {
            None => Err(ParseError::MissingQuantum),
            Some(0) => Err(ParseError::ZeroQuantum),
            Some(quantum) => Ok(Policy::RoundRobin { quantum }),
        },
        other => Err(ParseError::UnknownPolicy(other.to_string())),
    }
}

fn parse_number<T: FromStr>(line: usize, key: &str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn value_of<'a>(line: usize, key: &str, value: Option<&'a str>) -> Result<&'a str, ParseError> {
    value.ok_or_else(|| ParseError::MissingValue {
        line,
        key: key.to_string(),
    })
}

fn parse_process(line: usize, fields: &[&str]) -> Result<ProcessSpec, ParseError> {
    let (mut name, mut arrival, mut burst) = (None, None, None);

    for pair in fields.chunks(2) {
        let key = pair[0];
        let value = value_of(line, key, pair.get(1).copied())?;
        match key {
            "name" => name = Some(value),
            "arrival" => arrival = Some(parse_number::<Ticks>(line, key, value)?),
            "burst" => burst = Some(parse_number::<Ticks>(line, key, value)?),
            other => log::debug!("line {line}: ignoring process field '{other}'"),
        }
    }

    let missing = |name| ParseError::MissingParameter {
        line: Some(line),
        name,
    };
    let name = name.ok_or_else(|| missing("name"))?;
    let arrival = arrival.ok_or_else(|| missing("arrival"))?;
    let burst = burst.ok_or_else(|| missing("burst"))?;
    if burst == 0 {
        return Err(ParseError::ZeroBurst {
            line,
            name: name.to_string(),
        });
    }

    Ok(ProcessSpec::new(name, arrival, burst))
}

pub fn parse(text: &str) -> Result<Workload, ParseError> {
    let mut runfor: Option<Ticks> = None;
    let mut policy_keyword = None;
    let mut quantum: Option<Ticks> = None;
    let mut declared_count: Option<usize> = None;
    let mut processes = Vec::new();
    let mut names = FxHashSet::default();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let Some((&directive, rest)) = tokens.split_first() else {
            continue;
        };
        if directive.starts_with('#') {
            continue;
        }

        match directive {
            "end" => break,
            "process" => {
                let spec = parse_process(line, rest)?;
                if !names.insert(spec.name.clone()) {
                    return Err(ParseError::DuplicateProcess {
                        line,
                        name: spec.name,
                    });
                }
                processes.push(spec);
            }
            "processcount" | "runfor" | "quantum" | "use" => {
                let value = value_of(line, directive, rest.first().copied())?;
                match directive {
                    "processcount" => declared_count = Some(parse_number(line, directive, value)?),
                    "runfor" => runfor = Some(parse_number(line, directive, value)?),
                    "quantum" => quantum = Some(parse_number(line, directive, value)?),
                    _ => policy_keyword = Some(value),
                }
            }
            other => log::debug!("line {line}: ignoring unknown directive '{other}'"),
        }
    }

    let policy_keyword = policy_keyword.ok_or(ParseError::MissingParameter {
        line: None,
        name: "use",
    })?;
    let policy = parse_policy(policy_keyword, quantum)?;
    if quantum.is_some() && policy.quantum().is_none() {
        log::debug!("quantum is ignored by {policy}");
    }
    let runfor = runfor.ok_or(ParseError::MissingParameter {
        line: None,
        name: "runfor",
    })?;

    if let Some(declared) = declared_count
        && declared != processes.len()
    {
        log::warn!(
            "processcount says {declared} but {} processes are listed; using {}",
            processes.len(),
            processes.len()
        );
    }
    for spec in processes.iter().filter(|p| p.arrival >= runfor) {
        log::warn!(
            "{} arrives at {} and will never run within {runfor} ticks",
            spec.name,
            spec.arrival
        );
    }

    Ok(Workload {
        config: SimConfig {
            runfor,
            policy,
            declared_count,
        },
        processes,
    })
}
