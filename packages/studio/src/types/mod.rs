//! Domain types for schemas, templates and uploads.

pub mod schema;
pub mod template;
pub mod upload;

pub use schema::{
    is_valid_field_name, ExtractionSchema, FieldNode, FieldShape, FieldType, SchemaIssue,
};
pub use template::{LoadedTemplate, SchemaSnapshot, Template};
pub use upload::{FileKind, UploadedFile, DEFAULT_EXTENSION};
