use crate::docker::RuntimeError;

use super::types::ContainerSpec;

/// The container engine as seen by the supervisor.
pub trait ContainerRuntime {
    /// Whether `name` is currently running. A container that does not exist
    /// is `Ok(false)`; `Err` means the engine could not be asked.
    fn is_running(&self, name: &str) -> Result<bool, RuntimeError>;

    /// Create and start a detached container from `spec`.
    fn start(&self, spec: &ContainerSpec) -> Result<(), RuntimeError>;

    fn restart(&self, name: &str) -> Result<(), RuntimeError>;
}
