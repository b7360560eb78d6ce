//! Integration tests for the supervisor against a real Docker daemon.
//!
//! These require a running Docker daemon and are marked `#[ignore]`.
//! Run with: `cargo test -- --ignored`

use std::cell::RefCell;
use std::process::Command;
use std::time::Duration;

use castkeep::docker::DockerCli;
use castkeep::notify::Notifier;
use castkeep::supervisor::{Attempt, ContainerRuntime, ContainerSpec, ContainerState, run_cycle};

const TIMEOUT: Duration = Duration::from_secs(120);
const IMAGE: &str = "busybox:1.36";

#[derive(Default)]
struct Collect(RefCell<Vec<String>>);

impl Notifier for Collect {
    fn notify(&self, subject: &str, _body: &str) {
        self.0.borrow_mut().push(subject.to_string());
    }
}

/// Removes the container on drop so a failed assertion does not leak it.
struct Cleanup(String);

impl Drop for Cleanup {
    fn drop(&mut self) {
        let _ = Command::new("docker").args(["rm", "-f", &self.0]).output();
    }
}

fn unique_name(tag: &str) -> String {
    format!("castkeep-it-{tag}-{}", std::process::id())
}

/// A busybox shell kept alive by an open tty.
fn shell_spec(name: &str) -> ContainerSpec {
    let mut spec = ContainerSpec::new(name, IMAGE);
    spec.run_args = vec!["-i".into(), "-t".into()];
    spec
}

#[test]
#[ignore]
fn missing_container_is_started() {
    let name = unique_name("start");
    let _cleanup = Cleanup(name.clone());
    let runtime = DockerCli::new(TIMEOUT);
    let notifier = Collect::default();

    let spec = shell_spec(&name);
    let report = run_cycle(&[spec], &runtime, &notifier);

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.initial, ContainerState::Stopped);
    assert_eq!(outcome.start, Attempt::Succeeded);
    assert!(runtime.is_running(&name).unwrap());
}

#[test]
#[ignore]
fn stopped_container_is_restarted() {
    let name = unique_name("restart");
    let _cleanup = Cleanup(name.clone());
    let runtime = DockerCli::new(TIMEOUT);

    let spec = shell_spec(&name);
    runtime.start(&spec).unwrap();
    Command::new("docker")
        .args(["stop", "-t", "1", &name])
        .output()
        .unwrap();
    assert!(!runtime.is_running(&name).unwrap());

    let notifier = Collect::default();
    let report = run_cycle(&[spec], &runtime, &notifier);

    let outcome = &report.outcomes[0];
    // `docker run` fails because the name is taken; the restart recovers it.
    assert!(matches!(outcome.start, Attempt::Failed(_)));
    assert_eq!(outcome.restart, Attempt::Succeeded);
    assert!(outcome.healthy());
    assert_eq!(
        notifier.0.borrow().as_slice(),
        [format!("Failed to start {name}"), format!("Container {name} down")]
    );
}

#[test]
#[ignore]
fn unknown_container_queries_as_stopped() {
    let runtime = DockerCli::new(TIMEOUT);
    assert!(!runtime.is_running(&unique_name("absent")).unwrap());
}

#[test]
#[ignore]
fn unknown_image_alerts_on_every_failure() {
    let name = unique_name("badimage");
    let _cleanup = Cleanup(name.clone());
    let runtime = DockerCli::new(TIMEOUT);
    let notifier = Collect::default();

    let mut spec = shell_spec(&name);
    spec.image = "castkeep-no-such-image:never".into();
    let report = run_cycle(&[spec], &runtime, &notifier);

    let outcome = &report.outcomes[0];
    assert!(matches!(outcome.start, Attempt::Failed(_)));
    assert!(matches!(outcome.restart, Attempt::Failed(_)));
    assert_eq!(notifier.0.borrow().len(), 3);
}
