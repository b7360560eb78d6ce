use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser, Subcommand};

use castkeep::appcast::{self, Indent};
use castkeep::logging;
use castkeep::versions::{ReleaseEntry, StoreError, VersionStore};

const VERSIONS_FILE: &str = "versions.json";
const APPCAST_FILE: &str = "appcast.xml";

const EXAMPLES: &str = "\
Examples:
  # Append a new iOS beta version:
  castkeep append --platform ios --type beta --version 1.3.0 --link \"https://example.com/download/app-1.3.0.ipa\" --changelog \"New feature: Dark mode\" \"Bug fixes\"

  # Append a new Android release version:
  castkeep append --platform android --type release --version 1.2.1 --link \"https://example.com/download/app-1.2.1.apk\" --changelog \"Performance improvements\"

  # Promote a beta version to release:
  castkeep promote --platform ios --version 1.3.0";

/// Manage app versions and appcast
#[derive(Parser)]
#[command(name = "castkeep", version)]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Directory holding versions.json and appcast.xml [default: the executable's directory]
    #[arg(long, global = true, env = "CASTKEEP_DIR")]
    dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new version to the versions file and update the appcast
    Append {
        /// Platform (ios, android)
        #[arg(long)]
        platform: String,
        /// Version type (beta, release)
        #[arg(long = "type")]
        kind: String,
        /// Version number
        #[arg(long)]
        version: String,
        /// Download link
        #[arg(long)]
        link: String,
        /// Changelog entries (multiple entries allowed)
        #[arg(long, num_args = 0..)]
        changelog: Vec<String>,
    },

    /// Copy a beta version to the release section
    Promote {
        /// Platform (ios, android)
        #[arg(long)]
        platform: String,
        /// Version number to promote
        #[arg(long)]
        version: String,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::InvalidSubcommand => 1,
                _ => err.exit_code(),
            };
            let _ = err.print();
            return ExitCode::from(code as u8);
        }
    };

    logging::init(cli.verbose, "warn");

    let Some(command) = cli.command else {
        println!("No valid action specified. Use 'append' or 'promote'.");
        return ExitCode::FAILURE;
    };

    let result = data_dir(cli.dir).and_then(|dir| run(command, &dir));
    match result {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err.downcast_ref::<StoreError>() {
                Some(store_err) if store_err.is_not_found() => println!("Error: {store_err}"),
                _ => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Apply `command` to the store in `dir` and regenerate the appcast.
///
/// The store is only written once the mutation succeeded.
fn run(command: Commands, dir: &Path) -> Result<String> {
    let versions_path = dir.join(VERSIONS_FILE);
    let appcast_path = dir.join(APPCAST_FILE);

    let mut store = VersionStore::load(&versions_path)?;

    let message = match command {
        Commands::Append {
            platform,
            kind,
            version,
            link,
            changelog,
        } => {
            let entry = ReleaseEntry::dated_today(&version, link, changelog);
            store.append(&platform, &kind, entry);
            tracing::info!(%platform, %kind, %version, "version appended");
            format!("Version {version} appended to {platform}/{kind}")
        }
        Commands::Promote { platform, version } => {
            store.promote(&platform, &version)?;
            tracing::info!(%platform, %version, "version promoted");
            format!("Version {version} promoted from beta to release for {platform}")
        }
    };

    store.save(&versions_path)?;
    appcast::write_file(&store, &appcast_path, Indent::default())
        .with_context(|| format!("failed to write {}", appcast_path.display()))?;

    Ok(message)
}

/// `--dir` if given, otherwise the directory the executable lives in.
fn data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    let exe = std::env::current_exe().context("failed to locate the running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .context("executable has no parent directory")
}
