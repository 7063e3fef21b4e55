//! # JSON Documents
//!
//! A whole-value JSON file bound to one path.
//!
//! ## Load Outcomes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        JsonDocument::load                               │
//! │                                                                         │
//! │  file exists, parses      → Existing   (parsed value)                  │
//! │  file missing             → Created    (empty file written)            │
//! │  file exists, bad content → Recovered  (overwritten with empty, warn)  │
//! │  anything else            → StoreError::Io                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Saving
//! The value is written in full to `<file>.tmp` next to the target and then
//! renamed over it. A crash mid-write leaves the previous file intact.

use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// What [`JsonDocument::load`] found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file held valid data.
    Existing,
    /// There was no file; an empty one was written.
    Created,
    /// The file could not be parsed and was reset to empty.
    Recovered,
}

/// A loaded value together with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded<T> {
    pub value: T,
    pub outcome: LoadOutcome,
}

/// A pretty-printed JSON file holding one `T`.
#[derive(Debug, Clone)]
pub struct JsonDocument<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Binds a document to `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonDocument {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// The file this document reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document, creating or resetting the file when needed.
    pub fn load(&self) -> StoreResult<Loaded<T>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No file yet, creating an empty one");
                return self.reset(LoadOutcome::Created);
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                debug!(path = %self.path.display(), "Loaded existing file");
                Ok(Loaded {
                    value,
                    outcome: LoadOutcome::Existing,
                })
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "File is unreadable, replacing it with an empty one"
                );
                self.reset(LoadOutcome::Recovered)
            }
        }
    }

    /// Writes `value` in full, replacing the previous contents.
    pub fn save(&self, value: &T) -> StoreResult<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let tmp = self.temp_path();
        fs::write(&tmp, &buf).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), bytes = buf.len(), "Saved");
        Ok(())
    }

    fn reset(&self, outcome: LoadOutcome) -> StoreResult<Loaded<T>> {
        let value = T::default();
        self.save(&value)?;
        Ok(Loaded { value, outcome })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
