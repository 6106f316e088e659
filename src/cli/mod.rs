//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the snapshot store and the engine.

pub mod report;
pub mod tag;

pub use report::{handle_credits_command, handle_series_command, CreditsArgs, SeriesArgs};
pub use tag::handle_tags_command;

use std::path::PathBuf;

use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::LedgerSnapshot;
use crate::storage::{FileStore, LedgerStore};

/// Resolved paths and settings shared by all commands
pub struct CliContext {
    pub paths: LedgerPaths,
    pub settings: Settings,
    snapshot_path: PathBuf,
}

impl CliContext {
    /// `snapshot` overrides the snapshot document in the data directory
    pub fn new(paths: LedgerPaths, settings: Settings, snapshot: Option<PathBuf>) -> Self {
        let snapshot_path = snapshot.unwrap_or_else(|| paths.snapshot_file());
        Self {
            paths,
            settings,
            snapshot_path,
        }
    }

    pub fn snapshot_path(&self) -> &PathBuf {
        &self.snapshot_path
    }

    pub fn store(&self) -> LedgerResult<FileStore> {
        FileStore::new(&self.snapshot_path)
    }

    /// Load the snapshot, pointing at `init` when there is none yet
    pub fn load_snapshot(&self) -> LedgerResult<LedgerSnapshot> {
        let store = self.store()?;
        if !store.exists() {
            return Err(LedgerError::Storage(format!(
                "No snapshot at {}. Run 'tagledger init' or pass --snapshot.",
                self.snapshot_path.display()
            )));
        }
        store.snapshot()
    }
}
