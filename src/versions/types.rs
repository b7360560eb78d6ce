use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Channel that `promote` copies from.
pub const BETA: &str = "beta";
/// Channel that `promote` copies into.
pub const RELEASE: &str = "release";
/// Platforms present in a freshly created store.
pub const DEFAULT_PLATFORMS: [&str; 2] = ["ios", "android"];

/// One published build of the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseEntry {
    pub version_number: String,
    /// Calendar date (`YYYY-MM-DD`) stamped when the entry was created.
    pub release_date: String,
    pub download_link: String,
    #[serde(default)]
    pub changelog: Vec<String>,
}

impl ReleaseEntry {
    pub fn new(
        version_number: impl Into<String>,
        release_date: impl Into<String>,
        download_link: impl Into<String>,
        changelog: Vec<String>,
    ) -> Self {
        Self {
            version_number: version_number.into(),
            release_date: release_date.into(),
            download_link: download_link.into(),
            changelog,
        }
    }

    /// Build an entry stamped with today's local date.
    pub fn dated_today(
        version_number: impl Into<String>,
        download_link: impl Into<String>,
        changelog: Vec<String>,
    ) -> Self {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        Self::new(version_number, today, download_link, changelog)
    }
}

/// Release channels of one platform, keyed by type ("beta", "release", ...).
/// Each list is newest-first.
pub type Channels = IndexMap<String, Vec<ReleaseEntry>>;

/// Platform → channel → entries, in file/insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionStore {
    platforms: IndexMap<String, Channels>,
}

impl VersionStore {
    /// Store with every default platform holding empty beta and release lists.
    pub fn seeded() -> Self {
        let platforms = DEFAULT_PLATFORMS
            .iter()
            .map(|p| (p.to_string(), seeded_channels()))
            .collect();
        Self { platforms }
    }

    pub fn platforms(&self) -> impl Iterator<Item = (&str, &Channels)> {
        self.platforms.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn platform(&self, platform: &str) -> Option<&Channels> {
        self.platforms.get(platform)
    }

    /// Entries of one channel, newest first.
    pub fn channel(&self, platform: &str, kind: &str) -> Option<&[ReleaseEntry]> {
        self.platforms
            .get(platform)
            .and_then(|c| c.get(kind))
            .map(Vec::as_slice)
    }

    pub fn channel_mut(&mut self, platform: &str, kind: &str) -> Option<&mut Vec<ReleaseEntry>> {
        self.platforms
            .get_mut(platform)
            .and_then(|c| c.get_mut(kind))
    }

    pub(super) fn platforms_mut(&mut self) -> &mut IndexMap<String, Channels> {
        &mut self.platforms
    }
}

pub(super) fn seeded_channels() -> Channels {
    let mut channels = Channels::new();
    channels.insert(BETA.to_string(), Vec::new());
    channels.insert(RELEASE.to_string(), Vec::new());
    channels
}

/// Failures of the version ledger.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid platform '{0}' or missing beta/release types")]
    UnknownPlatform(String),

    #[error("Beta version {version} not found for platform {platform}")]
    BetaNotFound { platform: String, version: String },
}

impl StoreError {
    /// True for a `promote` whose target does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownPlatform(_) | Self::BetaNotFound { .. })
    }
}
