use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{ArgAction, Parser};

use castkeep::config::{self, Config};
use castkeep::docker::{self, DockerCli};
use castkeep::logging;
use castkeep::notify;
use castkeep::supervisor::{self, Report};

/// Start missing Docker containers, restart crashed ones, and mail alerts on failure.
///
/// Runs a single pass and exits; schedule it with cron or a systemd timer.
#[derive(Parser)]
#[command(name = "castkeep-watch", version)]
struct Cli {
    /// Supervisor config file
    #[arg(short, long, env = "CASTKEEP_WATCH_CONFIG", default_value = config::CONFIG_FILE)]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, "info");

    let cfg = match config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match watch(&cfg) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn watch(cfg: &Config) -> anyhow::Result<Report> {
    let specs = cfg.container_specs()?;
    if specs.is_empty() {
        tracing::warn!("no containers configured");
    }

    let timeout = Duration::from_secs(cfg.docker_timeout);
    if let Err(err) = docker::ensure_available(timeout) {
        // Keep going: every query will fail and be handled as "stopped",
        // which is what raises the alerts.
        tracing::warn!(error = %err, "docker daemon is not reachable");
    }

    let notifier = notify::from_config(cfg.smtp.as_ref());
    let runtime = DockerCli::new(timeout);
    Ok(supervisor::run_cycle(&specs, &runtime, notifier.as_ref()))
}

fn print_report(report: &Report) {
    for outcome in &report.outcomes {
        println!("{}: {}", outcome.name, outcome.describe());
    }
    let summary = report.summary();
    println!(
        "{} containers: {} healthy, {} failed",
        summary.total, summary.healthy, summary.failed
    );
}
