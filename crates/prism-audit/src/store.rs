//! Line-level access to the JSONL store.
//!
//! `StoreReader` streams the store one line at a time and is shared by writer
//! recovery, the verifier and `tail`.  It never holds more than one line in
//! memory.
//!
//! A final line without a trailing `\n` is an append still in flight (or a
//! torn write).  It is never yielded as an entry; `has_torn_tail()` reports
//! whether one was seen.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use tracing::warn;

use prism_contracts::{
    entry::LogEntry,
    error::{PrismError, PrismResult},
};

/// One non-blank, newline-terminated line of the store.
#[derive(Debug, Clone)]
pub enum StoredLine {
    Entry(LogEntry),
    /// The line is not a parseable `LogEntry`.  Carries the parse error.
    Malformed(String),
}

/// Streaming reader over the store's complete lines.
pub struct StoreReader {
    reader: Option<BufReader<File>>,
    buf: String,
    torn_tail: bool,
}

impl StoreReader {
    /// Open `path` read-only.  A missing file reads as an empty store.
    pub fn open(path: &Path) -> PrismResult<Self> {
        let reader = match File::open(path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                return Err(PrismError::storage(
                    format!("open '{}' for reading", path.display()),
                    e,
                ))
            }
        };
        Ok(Self {
            reader,
            buf: String::new(),
            torn_tail: false,
        })
    }

    /// True once the reader has reached a final line with no newline.
    pub fn has_torn_tail(&self) -> bool {
        self.torn_tail
    }
}

impl Iterator for StoreReader {
    type Item = PrismResult<StoredLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let reader = self.reader.as_mut()?;
            self.buf.clear();

            match reader.read_line(&mut self.buf) {
                Ok(0) => {
                    self.reader = None;
                    return None;
                }
                Ok(_) if !self.buf.ends_with('\n') => {
                    self.torn_tail = true;
                    self.reader = None;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.reader = None;
                    return Some(Err(PrismError::storage("read audit store", e)));
                }
            }

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }

            return Some(Ok(match serde_json::from_str::<LogEntry>(line) {
                Ok(entry) => StoredLine::Entry(entry),
                Err(e) => StoredLine::Malformed(e.to_string()),
            }));
        }
    }
}

/// The most recent `limit` entries, oldest first.
///
/// Malformed lines are skipped with a warning; use the verifier to assess
/// integrity.
pub fn tail(path: &Path, limit: usize) -> PrismResult<Vec<LogEntry>> {
    let mut window: VecDeque<LogEntry> = VecDeque::with_capacity(limit);
    if limit == 0 {
        return Ok(Vec::new());
    }

    for (index, line) in StoreReader::open(path)?.enumerate() {
        match line? {
            StoredLine::Entry(entry) => {
                if window.len() == limit {
                    window.pop_front();
                }
                window.push_back(entry);
            }
            StoredLine::Malformed(reason) => {
                warn!(index, reason = %reason, "skipping malformed audit line");
            }
        }
    }

    Ok(window.into())
}
