use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::notify::SmtpConfig;
use crate::supervisor::ContainerSpec;

/// A configured container: either a bare image reference or an image with
/// extra `docker run` arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContainerEntry {
    Image(String),
    Detailed {
        image: String,
        #[serde(default)]
        args: Option<String>,
    },
}

impl ContainerEntry {
    pub fn image(&self) -> &str {
        match self {
            ContainerEntry::Image(image) => image,
            ContainerEntry::Detailed { image, .. } => image,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds before any single docker call is killed.
    pub docker_timeout: u64,
    /// Container name → image, in visiting order.
    pub containers: IndexMap<String, ContainerEntry>,
    pub smtp: Option<SmtpConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docker_timeout: 60,
            containers: IndexMap::new(),
            smtp: None,
        }
    }
}

impl Config {
    /// Resolve the container table into specs, splitting `args` shell-style.
    pub fn container_specs(&self) -> anyhow::Result<Vec<ContainerSpec>> {
        self.containers
            .iter()
            .map(|(name, entry)| -> anyhow::Result<ContainerSpec> {
                let run_args = match entry {
                    ContainerEntry::Detailed {
                        args: Some(args), ..
                    } => shell_words::split(args).map_err(|e| {
                        anyhow::anyhow!("container `{name}`: invalid args {args:?}: {e}")
                    })?,
                    _ => Vec::new(),
                };
                Ok(ContainerSpec {
                    name: name.clone(),
                    image: entry.image().to_string(),
                    run_args,
                })
            })
            .collect()
    }
}
