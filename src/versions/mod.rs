// Version ledger: the platform/channel release store behind the appcast.

mod persist;
mod store;
mod types;

pub use types::{BETA, Channels, DEFAULT_PLATFORMS, RELEASE, ReleaseEntry, StoreError, VersionStore};
