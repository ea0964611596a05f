//! Extraction Studio
//!
//! Build an extraction schema, keep it as a reusable template, and run it
//! against uploaded documents through a remote extraction service.
//!
//! # Usage
//!
//! ```rust,ignore
//! use extraction_studio::{ConvertTarget, ExtractionSession, FieldUpdate, FieldType, UploadedFile};
//! use extract_client::ExtractClient;
//!
//! let client = ExtractClient::new("https://extract.example.com", token);
//! let mut session = ExtractionSession::new(client);
//!
//! session.editor_mut().add_field();
//! session.editor_mut().update_field(0, FieldUpdate::new().name("total").field_type(FieldType::Number));
//! session.set_description("invoice");
//! session.upload([UploadedFile::from_path("invoice.pdf").await?]);
//!
//! session.convert(ConvertTarget::Selected).await?;
//! let csv = session.to_csv()?;
//! ```
//!
//! # Modules
//!
//! - [`types`] - Schema, template and upload types
//! - [`editor`] - Schema editing operations
//! - [`templates`] - Save reconciliation and template selection
//! - [`session`] - Uploads, conversion and the result slot
//! - [`export`] - JSON / CSV / outline rendering
//! - [`traits`] - Store and extractor abstractions
//! - [`stores`] - Storage implementations (MemoryStore, PostgresStore)
//! - [`testing`] - Mock implementations for testing

pub mod editor;
pub mod error;
pub mod export;
pub mod session;
pub mod stores;
pub mod templates;
pub mod testing;
pub mod traits;
pub mod types;

pub use editor::{FieldPath, FieldUpdate, SchemaEditor};
pub use error::{Result, StudioError};
pub use export::{flatten, render_outline, to_csv, to_json, ExportFormat};
pub use session::{ConvertTarget, ExtractionSession};
pub use templates::{
    save_template, save_template_as, update_template_by_id, SaveOutcome, SaveTemplate,
    SelectedTemplate, TemplateSelector,
};
pub use traits::{Extractor, SnapshotStore, StudioStore, TemplateStore};
pub use types::{
    is_valid_field_name, ExtractionSchema, FieldNode, FieldShape, FieldType, FileKind,
    LoadedTemplate, SchemaIssue, SchemaSnapshot, Template, UploadedFile,
};

pub use stores::MemoryStore;

#[cfg(feature = "postgres")]
pub use stores::PostgresStore;

pub use testing::{FailingStore, MockExtractor};
