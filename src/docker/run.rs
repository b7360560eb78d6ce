use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use super::types::{CommandOutput, ContainerCommand, RuntimeError};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run `cmd` to completion and capture its output.
///
/// The child is killed once `cmd.timeout` elapses. Exit status is not
/// interpreted here; see [`CommandOutput::into_result`].
pub fn run(cmd: &ContainerCommand) -> Result<CommandOutput, RuntimeError> {
    tracing::debug!(command = %cmd.display(), "running");

    let mut child = Command::new(&cmd.program)
        .args(&cmd.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RuntimeError::Spawn {
            command: cmd.display(),
            source,
        })?;

    // Drain both pipes on their own threads so a chatty child cannot block
    // on a full pipe while we poll.
    let stdout_handle = drain(child.stdout.take());
    let stderr_handle = drain(child.stderr.take());

    let start = Instant::now();
    let exit_status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break Ok(status),
            Ok(None) => {}
            Err(source) => break Err(source),
        }

        if start.elapsed() > cmd.timeout {
            let _ = child.kill();
            let _ = child.wait();
            // Reader threads are left detached: a grandchild may still hold
            // the pipes open.
            return Err(RuntimeError::TimedOut {
                command: cmd.display(),
                timeout: cmd.timeout,
            });
        }

        std::thread::sleep(POLL_INTERVAL);
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();

    let status = exit_status.map_err(|source| RuntimeError::Spawn {
        command: cmd.display(),
        source,
    })?;

    Ok(CommandOutput {
        exit_code: status.code(),
        stdout,
        stderr,
    })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str, timeout: Duration) -> ContainerCommand {
        ContainerCommand {
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
            timeout,
        }
    }

    #[test]
    fn captures_stdout_and_stderr() {
        let out = run(&sh("echo out; echo err >&2", Duration::from_secs(5))).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
    }

    #[test]
    fn reports_non_zero_exit_code() {
        let out = run(&sh("exit 3", Duration::from_secs(5))).unwrap();
        assert_eq!(out.exit_code, Some(3));
        assert!(!out.success());
    }

    #[test]
    fn kills_child_after_timeout() {
        let started = Instant::now();
        let err = run(&sh("exec sleep 5", Duration::from_millis(200))).unwrap_err();
        assert!(matches!(err, RuntimeError::TimedOut { .. }), "got {err:?}");
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let cmd = ContainerCommand {
            program: "castkeep-definitely-not-installed".into(),
            args: vec![],
            timeout: Duration::from_secs(1),
        };
        let err = run(&cmd).unwrap_err();
        assert!(matches!(err, RuntimeError::Spawn { .. }));
    }
}
