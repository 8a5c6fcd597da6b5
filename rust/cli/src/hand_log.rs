//! Append-only JSONL hand log.
//!
//! One [`HandRecord`] per line. The writer stamps each record with an RFC3339
//! timestamp; hand ids use the session date as prefix.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use pokersim_engine::logger::HandRecord;

use crate::error::CliError;
use crate::io_utils::{ensure_parent_dir, read_text};

/// Session prefix for hand ids, e.g. `20261019-143205-9f3a01c2`: UTC date,
/// time of day and a random suffix, so runs appending to one log never reuse
/// an id.
pub fn session_id() -> String {
    format!("{}-{:08x}", Utc::now().format("%Y%m%d-%H%M%S"), rand::random::<u32>())
}

#[derive(Debug)]
pub struct HandLogger {
    path: PathBuf,
    writer: BufWriter<File>,
    written: u64,
}

impl HandLogger {
    /// Opens `path` for appending, creating parent directories as needed.
    pub fn create(path: &Path) -> Result<Self, CliError> {
        ensure_parent_dir(path).map_err(|e| CliError::Io(std::io::Error::other(e)))?;
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&mut self, record: &HandRecord) -> Result<(), CliError> {
        let mut record = record.clone();
        record.ts.get_or_insert_with(|| Utc::now().to_rfc3339());
        serde_json::to_writer(&mut self.writer, &record).map_err(std::io::Error::other)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Flushes and returns the number of records written.
    pub fn finish(mut self) -> Result<u64, CliError> {
        self.writer.flush()?;
        Ok(self.written)
    }
}

/// Reads every record of a hand log, skipping blank lines.
pub fn read_hand_log(path: &Path) -> Result<Vec<HandRecord>, CliError> {
    let content = read_text(path).map_err(CliError::InvalidInput)?;
    content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| {
                CliError::InvalidInput(format!("{}:{}: {}", path.display(), i + 1, e))
            })
        })
        .collect()
}
