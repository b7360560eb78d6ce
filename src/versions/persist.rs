use std::io;
use std::path::Path;

use super::types::{StoreError, VersionStore};

impl VersionStore {
    /// Read the store from `path`.
    ///
    /// A missing file yields [`VersionStore::seeded`]; anything that is not a
    /// well-formed store is a [`StoreError::Parse`].
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = match std::fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no versions file, starting from defaults");
                return Ok(Self::seeded());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_slice(&raw).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the store as 2-space indented JSON.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut json = serde_json::to_string_pretty(self).map_err(|e| io_err(io::Error::from(e)))?;
        json.push('\n');
        std::fs::write(path, json).map_err(io_err)?;
        tracing::debug!(path = %path.display(), "versions file written");
        Ok(())
    }
}
