//! JSON-lines event log.
//!
//! One object per line: the clock reading plus the event fields, e.g.
//! `{"tMs":1200,"type":"locked","linesCleared":1,"points":40,"score":76,"lines":1}`.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use blockfall_core::GameEvent;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogRecord<'a> {
    t_ms: u64,
    #[serde(flatten)]
    event: &'a GameEvent,
}

#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
    out: BufWriter<File>,
    buf: Vec<u8>,
}

impl EventLog {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening event log {}", path.display()))?;

        Ok(Self {
            path,
            out: BufWriter::new(file),
            buf: Vec::with_capacity(256),
        })
    }

    pub fn write(&mut self, t_ms: u64, event: &GameEvent) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, &LogRecord { t_ms, event })
            .context("encoding event")?;
        self.buf.push(b'\n');
        self.out
            .write_all(&self.buf)
            .with_context(|| format!("writing event log {}", self.path.display()))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out
            .flush()
            .with_context(|| format!("flushing event log {}", self.path.display()))
    }
}
