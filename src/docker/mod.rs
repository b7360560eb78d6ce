// Docker runtime: `docker` CLI calls with timeouts, behind the supervisor's runtime seam.

pub mod commands;
pub mod engine;
pub mod run;
pub mod types;

pub use engine::{DockerCli, ensure_available};
pub use run::run;
pub use types::{CommandOutput, ContainerCommand, RuntimeError};
