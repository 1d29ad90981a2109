use rand::prelude::*;

use super::process::ProcessSpec;
use crate::core::state::Ticks;

/// Shape of a generated workload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bernoulli {
    // Arrivals are drawn for ticks 0..ticks
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
}

impl Default for Bernoulli {
    fn default() -> Self {
        Self {
            ticks: 40,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
        }
    }
}

impl Bernoulli {
    /// At most one arrival per tick; same seed, same workload.
    pub fn generate(&self, seed: u64) -> Vec<ProcessSpec> {
        assert!(
            self.short_burst > 0 && self.long_burst > 0,
            "Generated bursts must be positive"
        );
        let mut rng = StdRng::seed_from_u64(seed);
        let mut drawn = Vec::new();

        for t in 0..self.ticks {
            if rng.random::<f64>() < self.p_arrival {
                let burst = if rng.random::<f64>() < self.p_short {
                    self.short_burst
                } else {
                    self.long_burst
                };
                drawn.push((t, burst));
            }
        }

        // Pad so that name order matches creation order
        let width = drawn.len().to_string().len();
        drawn
            .into_iter()
            .enumerate()
            .map(|(i, (arrival, burst))| {
                ProcessSpec::new(format!("P{:0width$}", i + 1), arrival, burst)
            })
            .collect()
    }
}
