use anyhow::{Context, Result};
use sched_sim::{
    Summary, Workload,
    input::parse_policy,
    report,
    sim::{Bernoulli, simulate},
};
use std::{env, fs, io::Write, path::PathBuf, process::ExitCode};

const USAGE: &str = "Usage: sched_sim <input file>\n       sched_sim --bernoulli <fcfs|sjf|rr> <seed> [quantum]";

// Generated workloads get room to drain after the last arrival
const BERNOULLI_RUNFOR: u64 = 120;

enum Command {
    File(PathBuf),
    Bernoulli {
        policy: String,
        seed: u64,
        quantum: Option<u64>,
    },
}

impl Command {
    fn from_args(args: &[String]) -> Option<Self> {
        match args {
            [path] if path != "--bernoulli" => Some(Self::File(PathBuf::from(path))),
            [flag, policy, seed, rest @ ..] if flag == "--bernoulli" && rest.len() <= 1 => {
                let quantum = match rest.first() {
                    Some(q) => Some(q.parse().ok()?),
                    None => None,
                };
                Some(Self::Bernoulli {
                    policy: policy.clone(),
                    seed: seed.parse().ok()?,
                    quantum,
                })
            }
            _ => None,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = Command::from_args(&args) else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    let outcome = match command {
        Command::File(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("cannot read input file {}", path.display()))?;
            let workload: Workload = text.parse()?;
            workload.simulate()
        }
        Command::Bernoulli {
            policy,
            seed,
            quantum,
        } => {
            let policy = parse_policy(&policy, quantum)?;
            let processes = Bernoulli::default().generate(seed);
            log::info!("generated {} processes from seed {seed}", processes.len());
            simulate(policy, BERNOULLI_RUNFOR, processes)
        }
    };

    log_averages(&outcome.summary());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &outcome).context("writing report")?;
    out.flush().context("writing report")?;
    Ok(())
}

fn log_averages(summary: &Summary) {
    match (
        summary.mean_wait(),
        summary.mean_turnaround(),
        summary.mean_response(),
    ) {
        (Some(wait), Some(turnaround), Some(response)) => log::info!(
            "Average wait {wait:.2}, turnaround {turnaround:.2}, response {response:.2} ticks over {} finished",
            summary.rows.len()
        ),
        _ => log::info!("no process finished"),
    }
}
