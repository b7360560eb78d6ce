use std::path::Path;

use anyhow::{Context, Result};

use super::types::Config;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "castkeep-watch.yaml";
/// Overrides `smtp.password` so the secret can stay out of the file.
pub const SMTP_PASSWORD_ENV: &str = "CASTKEEP_SMTP_PASSWORD";

/// Load the supervisor config from `path`, then apply environment overrides.
pub fn load(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    apply_env(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn apply_env(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(smtp) = config.smtp.as_mut()
        && let Some(password) = lookup(SMTP_PASSWORD_ENV)
    {
        smtp.password = Some(password);
    }
}
