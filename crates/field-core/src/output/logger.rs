//! Frame Logger
//!
//! Append-only JSONL frame snapshot logging.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use field_events::FrameSnapshot;

/// Errors writing snapshots.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes frame snapshots to a JSONL file, one per line.
pub struct FrameLogger {
    writer: Option<BufWriter<File>>,
    snapshot_count: u64,
}

impl FrameLogger {
    /// Creates a logger writing to the specified path, truncating it.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            snapshot_count: 0,
        })
    }

    /// Creates a logger that discards snapshots (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            snapshot_count: 0,
        }
    }

    pub fn snapshot_count(&self) -> u64 {
        self.snapshot_count
    }

    pub fn log(&mut self, snapshot: &FrameSnapshot) -> Result<(), OutputError> {
        self.snapshot_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = snapshot.to_jsonl()?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Flushes the buffer to disk.
    pub fn flush(&mut self) -> Result<(), OutputError> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for FrameLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush frame logger: {}", e);
        }
    }
}
