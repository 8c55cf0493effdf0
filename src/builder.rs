//! Directory builder for flexible configuration
//!
//! Picks the snapshot origin (in-memory value, JSON file, or a custom
//! [`SnapshotSource`]) and the engine configuration.

use crate::config::Config;
use crate::directory::Directory;
use crate::error::{OrgSearchError, Result};
use crate::source::{JsonFileSource, Snapshot, SnapshotSource};
use std::path::PathBuf;

/// Builder for a [`Directory`].
#[derive(Debug, Default)]
pub struct DirectoryBuilder {
    config: Config,
    snapshot: Option<Snapshot>,
    snapshot_path: Option<PathBuf>,
    source: Option<Box<dyn SnapshotSource>>,
}

impl DirectoryBuilder {
    /// Create a new builder with default configuration and an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Use an in-memory snapshot. Clears any path or source set earlier.
    pub fn snapshot(mut self, snapshot: Snapshot) -> Self {
        self.snapshot = Some(snapshot);
        self.snapshot_path = None;
        self.source = None;
        self
    }

    /// Load the snapshot from a JSON file. The file is re-read on
    /// [`Directory::refresh`].
    pub fn snapshot_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.snapshot_path = Some(path.into());
        self.snapshot = None;
        self.source = None;
        self
    }

    /// Pull snapshots from a custom source.
    pub fn source<S: SnapshotSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self.snapshot = None;
        self.snapshot_path = None;
        self
    }

    /// Build the directory, fetching the initial snapshot if needed.
    pub fn build(self) -> Result<Directory> {
        self.config.validate().map_err(OrgSearchError::Config)?;

        if let Some(source) = self.source {
            Directory::from_source(source, self.config)
        } else if let Some(path) = self.snapshot_path {
            Directory::from_source(Box::new(JsonFileSource::new(path)), self.config)
        } else {
            Ok(Directory::with_config(
                self.snapshot.unwrap_or_default(),
                self.config,
            ))
        }
    }
}
