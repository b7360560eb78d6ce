use std::fmt;

/// A container the supervisor keeps alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    /// Extra `docker run` arguments, placed before the image.
    pub run_args: Vec<String>,
}

impl ContainerSpec {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            run_args: Vec::new(),
        }
    }
}

/// Running state observed by a single query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerState {
    Running,
    Stopped,
    /// The runtime query itself failed; branches like `Stopped`.
    Unknown(String),
}

impl ContainerState {
    pub fn is_running(&self) -> bool {
        matches!(self, ContainerState::Running)
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => f.write_str("running"),
            Self::Stopped => f.write_str("stopped"),
            Self::Unknown(err) => write!(f, "unknown ({err})"),
        }
    }
}

/// Result of one remediation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Skipped,
    Succeeded,
    Failed(String),
}

/// What happened to one container during a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub name: String,
    pub initial: ContainerState,
    pub start: Attempt,
    pub recheck: ContainerState,
    pub restart: Attempt,
}

impl Outcome {
    /// Running at the recheck, or brought back by the restart.
    pub fn healthy(&self) -> bool {
        self.recheck.is_running() || self.restart == Attempt::Succeeded
    }

    pub fn describe(&self) -> String {
        if self.recheck.is_running() {
            return match self.start {
                Attempt::Succeeded => "started".into(),
                _ => "running".into(),
            };
        }
        match &self.restart {
            Attempt::Succeeded => "restarted".into(),
            Attempt::Failed(err) => format!("down: {err}"),
            Attempt::Skipped => format!("down ({})", self.recheck),
        }
    }
}

/// Totals across a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub healthy: usize,
    pub failed: usize,
}

/// Outcomes of one supervisor cycle, in visiting order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn summary(&self) -> Summary {
        let healthy = self.outcomes.iter().filter(|o| o.healthy()).count();
        Summary {
            total: self.outcomes.len(),
            healthy,
            failed: self.outcomes.len() - healthy,
        }
    }
}
