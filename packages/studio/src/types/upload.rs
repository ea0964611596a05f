use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Result, StudioError};

/// Extension assumed when a file name has none.
pub const DEFAULT_EXTENSION: &str = ".pdf";

/// Broad category of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Pdf,
    Other,
}

/// A document the user has added to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a document from disk, keeping only its file name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            StudioError::validation(format!("cannot read {}: {}", path.display(), e))
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }

    /// Lowercase extension with a leading dot: `report.PDF` → `.pdf`.
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
    }

    pub fn kind(&self) -> FileKind {
        let mime = mime_guess::from_path(&self.name).first_or_octet_stream();
        if mime.type_() == mime_guess::mime::IMAGE {
            FileKind::Image
        } else if mime == mime_guess::mime::APPLICATION_PDF {
            FileKind::Pdf
        } else {
            FileKind::Other
        }
    }

    /// Standard base64 of the file bytes, without any data-URL prefix.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
