pub mod appcast;
pub mod config;
pub mod docker;
pub mod logging;
pub mod notify;
pub mod supervisor;
pub mod versions;
