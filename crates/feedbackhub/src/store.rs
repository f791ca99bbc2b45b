//! CSV-backed storage for feedback entries.
//!
//! The whole table lives in a single CSV file with an
//! `ID,Timestamp,Category,Message` header row. Appending reads every existing
//! row and rewrites the file; the table stays small and the on-disk format
//! stays trivially inspectable.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::feedback::FeedbackEntry;

/// Column the analytics operations require.
const MESSAGE_COLUMN: &str = "Message";

/// Handle to the feedback table's backing file.
///
/// The handle is cheap to clone and holds no open file descriptor; every
/// operation opens the file fresh.
#[derive(Debug, Clone)]
pub struct FeedbackStore {
    path: PathBuf,
}

impl FeedbackStore {
    /// Create a store handle for the given CSV path.
    ///
    /// The file itself is not created until the first append.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!(path = %path.display(), "opening feedback store");
        Self { path }
    }

    /// Path to the backing CSV file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored entry.
    ///
    /// A missing or zero-length file yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] if the header has no `Message`
    /// column, or a read error if the file cannot be parsed.
    pub fn load(&self) -> Result<Vec<FeedbackEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        if fs::metadata(&self.path)?.len() == 0 {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path).map_err(|source| Error::CsvRead {
            path: self.path.clone(),
            source,
        })?;

        let headers = reader
            .headers()
            .map_err(|source| Error::CsvRead {
                path: self.path.clone(),
                source,
            })?
            .clone();
        if !headers.iter().any(|name| name == MESSAGE_COLUMN) {
            return Err(Error::missing_column(MESSAGE_COLUMN));
        }

        let mut entries = Vec::new();
        for record in reader.deserialize() {
            let entry: FeedbackEntry = record.map_err(|source| Error::CsvRead {
                path: self.path.clone(),
                source,
            })?;
            entries.push(entry);
        }

        trace!(count = entries.len(), "loaded feedback entries");
        Ok(entries)
    }

    /// Append one entry to the table.
    ///
    /// Reads all existing rows, adds the new one, and rewrites the whole
    /// file. The parent directory is created on first write. There is no
    /// file locking; concurrent writers can lose rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing table cannot be read or the rewrite
    /// fails.
    pub fn append(&self, entry: &FeedbackEntry) -> Result<()> {
        let mut entries = self.load()?;
        entries.push(entry.clone());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        Self::write_entries(&self.path, &entries)?;
        debug!(id = %entry.id, total = entries.len(), "appended feedback entry");
        Ok(())
    }

    /// Number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    pub fn count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    /// Write a header row plus the given entries to `path`.
    ///
    /// Used for the main table rewrite and for the single-row scratch files
    /// of the topic-frequency loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_entries(path: &Path, entries: &[FeedbackEntry]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path).map_err(|source| Error::CsvWrite {
            path: path.to_path_buf(),
            source,
        })?;
        for entry in entries {
            writer.serialize(entry).map_err(|source| Error::CsvWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}
