//! Snapshot source backed by a JSON file on disk.

use super::{Snapshot, SnapshotSource};
use crate::error::Result;
use orgsearch_types::{Activity, Building, Organization};
use std::path::{Path, PathBuf};

/// Reads the whole file on every fetch, so edits to the file are picked up
/// by the next [`crate::Directory::refresh`].
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSource {
    fn buildings(&self) -> Result<Vec<Building>> {
        Ok(self.snapshot()?.buildings)
    }

    fn activities(&self) -> Result<Vec<Activity>> {
        Ok(self.snapshot()?.activities)
    }

    fn organizations(&self) -> Result<Vec<Organization>> {
        Ok(self.snapshot()?.organizations)
    }

    fn snapshot(&self) -> Result<Snapshot> {
        Snapshot::load(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "buildings": [{{ "id": 1, "address": "Red Square 1", "latitude": 55.7539, "longitude": 37.6208 }}] }}"#
        )
        .unwrap();

        let source = JsonFileSource::new(file.path());
        let buildings = source.buildings().unwrap();
        assert_eq!(buildings.len(), 1);
        assert_eq!(buildings[0].address, "Red Square 1");
        assert!(source.activities().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = JsonFileSource::new("/definitely/not/here/snapshot.json");
        assert!(matches!(
            source.snapshot(),
            Err(crate::error::OrgSearchError::Io(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let source = JsonFileSource::new(file.path());
        assert!(matches!(
            source.snapshot(),
            Err(crate::error::OrgSearchError::Serialization(_))
        ));
    }
}
