// Container supervisor: one check/start/restart pass over the configured containers.

mod cycle;
mod runtime;
mod types;

pub use cycle::run_cycle;
pub use runtime::ContainerRuntime;
pub use types::{Attempt, ContainerSpec, ContainerState, Outcome, Report, Summary};
