// Supervisor configuration: YAML file plus environment overrides.

mod loader;
mod types;

pub use loader::{CONFIG_FILE, SMTP_PASSWORD_ENV, load};
pub use types::{Config, ContainerEntry};
