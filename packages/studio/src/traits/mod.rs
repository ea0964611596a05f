//! Core trait abstractions.

pub mod extractor;
pub mod store;

pub use extractor::Extractor;
pub use store::{SnapshotStore, StudioStore, TemplateStore};
