use super::types::{BETA, RELEASE, ReleaseEntry, StoreError, VersionStore, seeded_channels};

impl VersionStore {
    /// Insert `entry` at the head of `platform`/`kind`.
    ///
    /// A platform seen for the first time starts with empty beta and release
    /// channels so it can be promoted later. No duplicate or format checks.
    pub fn append(&mut self, platform: &str, kind: &str, entry: ReleaseEntry) {
        self.platforms_mut()
            .entry(platform.to_string())
            .or_insert_with(seeded_channels)
            .entry(kind.to_string())
            .or_default()
            .insert(0, entry);
    }

    /// Copy the first beta entry numbered `version` to the head of the
    /// release channel. The beta entry stays where it is.
    ///
    /// On error the store is left untouched.
    pub fn promote(&mut self, platform: &str, version: &str) -> Result<&ReleaseEntry, StoreError> {
        let unknown = || StoreError::UnknownPlatform(platform.to_string());

        let channels = self.platforms_mut().get_mut(platform).ok_or_else(unknown)?;
        let Some(beta) = channels.get(BETA) else {
            return Err(unknown());
        };
        let found = beta.iter().find(|e| e.version_number == version).cloned();

        let release = channels.get_mut(RELEASE).ok_or_else(unknown)?;
        let entry = found.ok_or_else(|| StoreError::BetaNotFound {
            platform: platform.to_string(),
            version: version.to_string(),
        })?;

        release.insert(0, entry);
        Ok(&release[0])
    }
}
