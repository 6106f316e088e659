//! Storage layer for tag-ledger
//!
//! The engine only ever sees a [`LedgerSnapshot`]; this module is the read
//! side of the ledger store that produces one. Snapshots are loaded from a
//! JSON or YAML document, and the only write is creating an empty document.

pub mod document;
pub mod file_io;

pub use document::{SnapshotDocument, TransactionRecord};
pub use file_io::{read_json, read_yaml, write_json_atomic};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{LedgerSnapshot, Tag, Transaction};

/// Read interface of a ledger store
pub trait LedgerStore {
    /// All transactions, each carrying copies of its tags
    fn transactions(&self) -> LedgerResult<Vec<Transaction>>;

    /// The tag catalogue
    fn tags(&self) -> LedgerResult<Vec<Tag>>;

    /// A consistent snapshot of both
    fn snapshot(&self) -> LedgerResult<LedgerSnapshot> {
        Ok(LedgerSnapshot::new(self.tags()?, self.transactions()?))
    }
}

/// Document encodings understood by [`FileStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> LedgerResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(LedgerError::Storage(format!(
                "Unsupported snapshot file {} (expected .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }
}

/// Ledger store backed by a single snapshot document
pub struct FileStore {
    path: PathBuf,
    format: DocumentFormat,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let path = path.into();
        let format = DocumentFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the raw document
    pub fn read_document(&self) -> LedgerResult<SnapshotDocument> {
        debug!(path = %self.path.display(), format = ?self.format, "reading snapshot");
        match self.format {
            DocumentFormat::Json => read_json(&self.path),
            DocumentFormat::Yaml => read_yaml(&self.path),
        }
    }

    /// Write an empty document unless one already exists
    ///
    /// Returns whether a new document was created.
    pub fn create_empty(&self) -> LedgerResult<bool> {
        if self.exists() {
            return Ok(false);
        }
        if self.format != DocumentFormat::Json {
            return Err(LedgerError::Storage(format!(
                "Can only create JSON snapshots, not {}",
                self.path.display()
            )));
        }
        write_json_atomic(&self.path, &SnapshotDocument::default())?;
        Ok(true)
    }
}

impl LedgerStore for FileStore {
    fn transactions(&self) -> LedgerResult<Vec<Transaction>> {
        Ok(self.snapshot()?.transactions().to_vec())
    }

    fn tags(&self) -> LedgerResult<Vec<Tag>> {
        Ok(self.read_document()?.tags)
    }

    fn snapshot(&self) -> LedgerResult<LedgerSnapshot> {
        Ok(self.read_document()?.into_snapshot())
    }
}
