use std::time::Duration;

/// Describes one runtime invocation. `args` is the full argument list passed
/// to `program` (normally `docker`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerCommand {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl ContainerCommand {
    pub fn docker(args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: "docker".into(),
            args,
            timeout,
        }
    }

    /// Shell-like rendering for logs and error messages.
    pub fn display(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        shell_words::join(parts)
    }
}

/// Captured result of a finished invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Turn a non-zero exit into [`RuntimeError::Failed`].
    pub fn into_result(self, cmd: &ContainerCommand) -> Result<Self, RuntimeError> {
        if self.success() {
            return Ok(self);
        }
        Err(RuntimeError::Failed {
            command: cmd.display(),
            exit_code: self.exit_code,
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// A container runtime call that did not complete successfully.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("failed to invoke `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}: {stderr}", describe_exit(*exit_code))]
    Failed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("`{command}` timed out after {}s", timeout.as_secs())]
    TimedOut { command: String, timeout: Duration },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd() -> ContainerCommand {
        ContainerCommand::docker(
            vec!["inspect".into(), "-f".into(), "{{.State.Running}}".into(), "web".into()],
            Duration::from_secs(5),
        )
    }

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let mut c = cmd();
        c.args.push("two words".into());
        let shown = c.display();
        assert!(shown.starts_with("docker inspect -f "), "{shown}");
        assert!(shown.ends_with(" web 'two words'"), "{shown}");
    }

    #[test]
    fn successful_output_passes_through() {
        let out = CommandOutput {
            exit_code: Some(0),
            stdout: "true\n".into(),
            stderr: String::new(),
        };
        assert_eq!(out.clone().into_result(&cmd()).unwrap(), out);
    }

    #[test]
    fn non_zero_exit_becomes_failed() {
        let out = CommandOutput {
            exit_code: Some(125),
            stdout: String::new(),
            stderr: "Conflict. The container name is already in use\n".into(),
        };
        let err = out.into_result(&cmd()).unwrap_err();
        assert!(matches!(err, RuntimeError::Failed { exit_code: Some(125), .. }));
        assert!(err.to_string().contains("status 125"));
        assert!(err.to_string().ends_with("already in use"));
    }

    #[test]
    fn killed_process_reports_signal() {
        let out = CommandOutput {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        let err = out.into_result(&cmd()).unwrap_err();
        assert!(err.to_string().contains("a signal"));
    }
}
