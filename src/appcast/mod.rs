// Appcast feed: projects the version ledger into the XML update feed.

mod element;
mod render;

pub use element::{Element, Indent, to_xml};
pub use render::{render, write_file};
