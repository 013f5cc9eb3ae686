use std::path::PathBuf;

/// Errors that can occur while reading data files or delivering submissions.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An I/O error occurred while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization or deserialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,

    /// An institution data file names the same institution twice.
    #[error("institution listed more than once: {0}")]
    DuplicateInstitution(String),

    /// An institution data file contains no institutions.
    #[error("institution data file is empty: {0}")]
    EmptyLookupTable(PathBuf),
}
