//! Command-line and environment configuration.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::model::LookupTable;
use crate::storage::{
    JsonlSink, LogSink, StorageError, SubmissionSink, default_data_dir, load_lookup_table,
};

/// Where accepted registrations are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    /// Write each submission to the application log only.
    Log,
    /// Append each submission to `submissions.jsonl` in the data directory.
    Jsonl,
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone, Parser)]
#[command(name = "ugcreg", version, about)]
pub struct Config {
    /// JSON file listing institutions and their program statistics.
    /// The built-in reference table is used when omitted.
    #[arg(long, env = "UGCREG_INSTITUTIONS", value_name = "FILE")]
    pub institutions: Option<PathBuf>,

    /// Submission sink.
    #[arg(long, env = "UGCREG_SINK", value_enum, default_value_t = SinkKind::Jsonl)]
    pub sink: SinkKind,

    /// Directory for submissions and the log file.
    #[arg(long, env = "UGCREG_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Returns the configured data directory, or the platform default.
    pub fn data_dir(&self) -> Result<PathBuf, StorageError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    /// Loads the configured lookup table, falling back to the built-in one.
    pub fn lookup_table(&self) -> Result<LookupTable, StorageError> {
        match &self.institutions {
            Some(path) => {
                let table = load_lookup_table(path)?;
                tracing::info!(path = %path.display(), count = table.len(), "institutions loaded");
                Ok(table)
            }
            None => {
                tracing::info!("using built-in institution table");
                Ok(LookupTable::builtin())
            }
        }
    }

    /// Builds the configured submission sink.
    pub fn submission_sink(&self, data_dir: &Path) -> Result<Box<dyn SubmissionSink>, StorageError> {
        Ok(match self.sink {
            SinkKind::Log => Box::new(LogSink),
            SinkKind::Jsonl => Box::new(JsonlSink::new(data_dir)?),
        })
    }
}
