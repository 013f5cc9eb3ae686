//! Institution data files and submission delivery.
//!
//! Submissions are handed to a [`SubmissionSink`]. The JSONL sink appends one
//! line per accepted form; nothing is ever read back.

mod error;
mod lookup;
mod sink;

pub use error::StorageError;
pub use lookup::load_lookup_table;
pub use sink::{JsonlSink, LogSink, SubmissionSink, default_data_dir};
