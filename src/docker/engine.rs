use std::time::Duration;

use crate::supervisor::{ContainerRuntime, ContainerSpec};

use super::commands::{inspect_command, restart_command, run_command, version_command};
use super::run::run;
use super::types::{CommandOutput, ContainerCommand, RuntimeError};

/// Verify that the Docker daemon is reachable.
pub fn ensure_available(timeout: Duration) -> Result<(), RuntimeError> {
    let cmd = version_command(timeout);
    run(&cmd)?.into_result(&cmd)?;
    Ok(())
}

/// [`ContainerRuntime`] backed by the `docker` CLI.
#[derive(Debug, Clone)]
pub struct DockerCli {
    timeout: Duration,
}

impl DockerCli {
    /// Every docker call is killed after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl ContainerRuntime for DockerCli {
    fn is_running(&self, name: &str) -> Result<bool, RuntimeError> {
        let cmd = inspect_command(name, self.timeout);
        running_from(run(&cmd)?, &cmd)
    }

    fn start(&self, spec: &ContainerSpec) -> Result<(), RuntimeError> {
        let cmd = run_command(spec, self.timeout);
        run(&cmd)?.into_result(&cmd)?;
        Ok(())
    }

    fn restart(&self, name: &str) -> Result<(), RuntimeError> {
        let cmd = restart_command(name, self.timeout);
        run(&cmd)?.into_result(&cmd)?;
        Ok(())
    }
}

/// Interpret the output of `docker inspect -f {{.State.Running}}`.
fn running_from(output: CommandOutput, cmd: &ContainerCommand) -> Result<bool, RuntimeError> {
    if output.success() {
        return Ok(output.stdout.trim() == "true");
    }
    if is_missing_container(&output.stderr) {
        return Ok(false);
    }
    output.into_result(cmd).map(|_| false)
}

/// `docker inspect` on an unknown name fails with one of these messages,
/// which is a definite "not running" rather than a failed query.
fn is_missing_container(stderr: &str) -> bool {
    let stderr = stderr.to_ascii_lowercase();
    stderr.contains("no such object") || stderr.contains("no such container")
}
