use std::path::Path;

use crate::versions::{ReleaseEntry, VersionStore};

use super::element::{Element, Indent, to_xml};

/// Build the appcast tree for `store`.
///
/// Platforms whose channels are all empty are left out. Entries follow the
/// store's own ordering: channel key order, then newest-first.
pub fn render(store: &VersionStore) -> Element {
    let mut root = Element::new("appcast");

    for (platform, channels) in store.platforms() {
        if channels.values().all(Vec::is_empty) {
            continue;
        }

        let mut app = Element::new("app").with_attr("platform", platform);
        for (kind, entries) in channels {
            for entry in entries {
                app.push(version_element(kind, entry));
            }
        }
        root.push(app);
    }

    root
}

fn version_element(kind: &str, entry: &ReleaseEntry) -> Element {
    let mut version = Element::new("version").with_attr("type", kind);
    version.push(Element::new("versionNumber").with_text(&entry.version_number));
    version.push(Element::new("releaseDate").with_text(&entry.release_date));
    version.push(Element::new("downloadLink").with_text(&entry.download_link));

    if !entry.changelog.is_empty() {
        let mut changelog = Element::new("changelog");
        for change in &entry.changelog {
            changelog.push(Element::new("item").with_text(change));
        }
        version.push(changelog);
    }

    version
}

/// Render `store` and write it to `path`.
pub fn write_file(store: &VersionStore, path: &Path, indent: Indent) -> std::io::Result<()> {
    let xml = to_xml(&render(store), indent);
    std::fs::write(path, xml)?;
    tracing::debug!(path = %path.display(), "appcast written");
    Ok(())
}
