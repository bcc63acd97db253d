//! Append-only CSV log of accepted time entries.

use crate::errors::AppResult;
use crate::models::time_entry::{LogRecord, TimeEntry};
use csv::WriterBuilder;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct LogStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the log with its header row if it does not exist yet.
    /// Returns `true` when a new file was created.
    pub fn ensure_initialized(&self) -> AppResult<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        if self.path.exists() {
            return Ok(false);
        }

        let mut wtr = WriterBuilder::new().from_path(&self.path)?;
        wtr.write_record(LogRecord::HEADERS)?;
        wtr.flush()?;
        tracing::info!(path = %self.path.display(), "created timetracking log");
        Ok(true)
    }

    /// Append one row for `entry`. The header is written first when the
    /// file is new or empty. Calls are serialized so rows never interleave.
    pub fn append(&self, entry: &TimeEntry) -> AppResult<LogRecord> {
        let record = entry.to_record();
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());

        let file = self.open_for_append()?;
        let needs_header = file.metadata()?.len() == 0;

        let mut wtr = WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        wtr.serialize(&record)?;
        wtr.flush()?;

        tracing::info!(
            path = %self.path.display(),
            subject = %record.subject,
            start = %record.start_time,
            end = %record.end_time,
            "entry appended"
        );
        Ok(record)
    }

    fn open_for_append(&self) -> AppResult<File> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(file)
    }
}
