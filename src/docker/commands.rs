use std::time::Duration;

use crate::supervisor::ContainerSpec;

use super::types::ContainerCommand;

/// Go template that prints `true`/`false` for a container's running flag.
const RUNNING_TEMPLATE: &str = "{{.State.Running}}";

/// Build a `docker inspect` command that reports whether `name` is running.
pub fn inspect_command(name: &str, timeout: Duration) -> ContainerCommand {
    ContainerCommand::docker(
        vec![
            "inspect".into(),
            "-f".into(),
            RUNNING_TEMPLATE.into(),
            name.into(),
        ],
        timeout,
    )
}

/// Build a detached `docker run` for `spec`: `run -d --name NAME [ARGS..] IMAGE`.
pub fn run_command(spec: &ContainerSpec, timeout: Duration) -> ContainerCommand {
    let mut args = vec![
        "run".into(),
        "-d".into(),
        "--name".into(),
        spec.name.clone(),
    ];
    args.extend(spec.run_args.iter().cloned());
    args.push(spec.image.clone());

    ContainerCommand::docker(args, timeout)
}

/// Build a `docker restart` for `name`.
pub fn restart_command(name: &str, timeout: Duration) -> ContainerCommand {
    ContainerCommand::docker(vec!["restart".into(), name.into()], timeout)
}

/// Build the daemon reachability probe.
pub fn version_command(timeout: Duration) -> ContainerCommand {
    ContainerCommand::docker(
        vec![
            "version".into(),
            "--format".into(),
            "{{.Server.Version}}".into(),
        ],
        timeout,
    )
}
