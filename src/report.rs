//! Plain-text rendering of a run: header, timeline, then the per-process summary.

use std::io::{self, Write};

use crate::core::Ticks;
use crate::sim::{Outcome, Summary};

pub fn write_header<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    writeln!(out, "{} processes", outcome.process_count())?;
    writeln!(out, "Using {}", outcome.policy)?;
    if let Some(quantum) = outcome.policy.quantum() {
        writeln!(out, "Quantum {quantum}")?;
    }
    writeln!(out)
}

pub fn write_timeline<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    for event in &outcome.timeline {
        writeln!(out, "{event}")?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, runfor: Ticks, summary: &Summary) -> io::Result<()> {
    writeln!(out, "Finished at time {runfor}")?;
    writeln!(out)?;
    for row in &summary.rows {
        writeln!(
            out,
            "{} wait {:3} turnaround {:3} response {}",
            row.name, row.wait, row.turnaround, row.response
        )?;
    }
    for name in &summary.unfinished {
        writeln!(out, "{name} did not finish")?;
    }
    Ok(())
}

pub fn write_report<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    write_header(out, outcome)?;
    write_timeline(out, outcome)?;
    write_summary(out, outcome.runfor, &outcome.summary())
}

pub fn render(outcome: &Outcome) -> String {
    let mut buf = Vec::new();
    write_report(&mut buf, outcome).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("report is valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Policy;
    use crate::sim::{ProcessSpec, simulate};

    #[test]
    fn renders_round_robin_run() {
        let outcome = simulate(
            Policy::RoundRobin { quantum: 2 },
            6,
            vec![
                ProcessSpec::new("B", 0, 2),
                ProcessSpec::new("A", 1, 1),
                ProcessSpec::new("C", 1, 9),
            ],
        );

        let expected = "\
3 processes
Using Round-Robin
Quantum 2

Time   0 : B arrived
Time   0 : B selected (burst   2)
Time   1 : A arrived
Time   1 : C arrived
Time   2 : B finished
Time   2 : A selected (burst   1)
Time   3 : A finished
Time   3 : C selected (burst   9)
Time   5 : C selected (burst   7)
Finished at time 6

A wait   1 turnaround   2 response 1
B wait   0 turnaround   2 response 0
C did not finish
";
        assert_eq!(render(&outcome), expected);
    }

    #[test]
    fn fcfs_header_has_no_quantum() {
        let outcome = simulate(Policy::Fcfs, 2, vec![ProcessSpec::new("A", 0, 1)]);
        let text = render(&outcome);
        assert!(text.starts_with("1 processes\nUsing First Come First Served\n\n"));
        assert!(text.contains("Time   1 : Idle\n"));
        assert!(text.ends_with("A wait   0 turnaround   1 response 0\n"));
    }
}
