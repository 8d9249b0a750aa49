//! Student list kept as a single JSON document on disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, error};

use crate::error::StorageError;
use crate::gradebook::Student;

use super::StudentStore;

/// JSON file backed store.
///
/// `save` truncates and rewrites the file in place; a crash mid-write can
/// leave it truncated.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        error!(path = %self.path.display(), "data file access failed: {}", source);
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> StorageError {
        error!(path = %self.path.display(), "data file is not valid JSON: {}", source);
        StorageError::Json {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl StudentStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Student>, StorageError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "data file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let students: Vec<Student> =
            serde_json::from_slice(&raw).map_err(|e| self.json_error(e))?;
        debug!(path = %self.path.display(), count = students.len(), "loaded students");
        Ok(students)
    }

    fn save(&self, students: &[Student]) -> Result<(), StorageError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        students
            .serialize(&mut ser)
            .map_err(|e| self.json_error(e))?;

        let mut file = fs::File::create(&self.path).map_err(|e| self.io_error(e))?;
        file.write_all(&buf).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), count = students.len(), "saved students");
        Ok(())
    }
}
