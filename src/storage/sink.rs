use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::StorageError;
use crate::model::FormRecord;

/// Receives each accepted registration.
///
/// Any `FnMut(&FormRecord) -> Result<(), StorageError>` closure is a sink.
pub trait SubmissionSink {
    /// Delivers one submitted record.
    fn submit(&mut self, record: &FormRecord) -> Result<(), StorageError>;
}

impl<F> SubmissionSink for F
where
    F: FnMut(&FormRecord) -> Result<(), StorageError>,
{
    fn submit(&mut self, record: &FormRecord) -> Result<(), StorageError> {
        self(record)
    }
}

/// Writes each submission to the application log and nowhere else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn submit(&mut self, record: &FormRecord) -> Result<(), StorageError> {
        let json = serde_json::to_string(record)?;
        tracing::info!(institution = %record.institution, record = %json, "form submitted");
        Ok(())
    }
}

/// One line of `submissions.jsonl`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionLine<'a> {
    submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    record: &'a FormRecord,
}

/// Appends each submission as one JSON line to `submissions.jsonl`.
#[derive(Debug, Clone)]
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// File name used inside the data directory.
    pub const FILE_NAME: &'static str = "submissions.jsonl";

    /// Creates a sink writing into `dir`, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(Self::FILE_NAME),
        })
    }

    /// Returns the path of the submissions file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, record: &FormRecord, submitted_at: DateTime<Utc>) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let line = SubmissionLine {
            submitted_at,
            record,
        };
        serde_json::to_writer(&mut file, &line)?;
        writeln!(file)?;

        tracing::info!(
            institution = %record.institution,
            path = %self.path.display(),
            "submission appended"
        );
        Ok(())
    }
}

impl SubmissionSink for JsonlSink {
    fn submit(&mut self, record: &FormRecord) -> Result<(), StorageError> {
        self.append(record, Utc::now())
    }
}

/// Returns the default data directory (`~/.local/share/ugcreg/` on Linux).
pub fn default_data_dir() -> Result<PathBuf, StorageError> {
    let data_dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
    Ok(data_dir.join("ugcreg"))
}
