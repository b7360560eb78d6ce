use crate::notify::Notifier;

use super::runtime::ContainerRuntime;
use super::types::{Attempt, ContainerSpec, ContainerState, Outcome, Report};

/// Check every container once, starting or restarting the ones that are down.
///
/// Containers are visited in order and one container's failure never stops
/// the rest. There is no retry beyond a single start and a single restart.
pub fn run_cycle(
    specs: &[ContainerSpec],
    runtime: &dyn ContainerRuntime,
    notifier: &dyn Notifier,
) -> Report {
    let outcomes = specs
        .iter()
        .map(|spec| supervise(spec, runtime, notifier))
        .collect();
    Report { outcomes }
}

#[tracing::instrument(skip_all, fields(container = %spec.name))]
fn supervise(
    spec: &ContainerSpec,
    runtime: &dyn ContainerRuntime,
    notifier: &dyn Notifier,
) -> Outcome {
    let name = spec.name.as_str();

    // ── Start if missing ─────────────────────────────────────────────
    let initial = query(runtime, name);
    let start = if initial.is_running() {
        Attempt::Skipped
    } else {
        match runtime.start(spec) {
            Ok(()) => {
                tracing::info!(image = %spec.image, "container started");
                Attempt::Succeeded
            }
            Err(err) => {
                tracing::error!(image = %spec.image, error = %err, "failed to start container");
                notifier.notify(&format!("Failed to start {name}"), &format!("Error: {err}"));
                Attempt::Failed(err.to_string())
            }
        }
    };

    // ── Restart if still down ────────────────────────────────────────
    let recheck = query(runtime, name);
    let restart = if recheck.is_running() {
        Attempt::Skipped
    } else {
        tracing::warn!("container is down, restarting");
        notifier.notify(
            &format!("Container {name} down"),
            &format!("Attempting to restart {name}."),
        );
        match runtime.restart(name) {
            Ok(()) => {
                tracing::info!("container restarted");
                Attempt::Succeeded
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to restart container");
                notifier.notify(&format!("Failed to restart {name}"), &format!("Error: {err}"));
                Attempt::Failed(err.to_string())
            }
        }
    };

    Outcome {
        name: name.to_string(),
        initial,
        start,
        recheck,
        restart,
    }
}

fn query(runtime: &dyn ContainerRuntime, name: &str) -> ContainerState {
    match runtime.is_running(name) {
        Ok(true) => ContainerState::Running,
        Ok(false) => {
            tracing::debug!("container is not running");
            ContainerState::Stopped
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to query container state, treating as stopped");
            ContainerState::Unknown(err.to_string())
        }
    }
}
