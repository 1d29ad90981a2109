pub mod driver;
pub mod metrics;
pub mod process;
pub mod workload;

pub use driver::{Outcome, Sim, simulate};
pub use metrics::{ProcessMetrics, Summary};
pub use process::ProcessSpec;
pub use workload::Bernoulli;
