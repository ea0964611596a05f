// Extraction Studio - API Core
//
// HTTP surface over the extraction-studio library: template persistence,
// raw schema snapshots, and document conversion with JSON/CSV export.

pub mod config;
pub mod server;

pub use config::*;
