// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log of module record operations

use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use tavern_core::Operation;
use thiserror::Error;

/// Errors that can occur in WAL operations
#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt WAL entry at line {line}: {source}")]
    Corrupt {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Append-only log, one JSON entry per line, synced on every append
pub struct Wal {
    file: File,
    sequence: u64,
}

impl Wal {
    /// Open or create a WAL at the given path, creating parent directories
    pub fn open(path: &Path) -> Result<Self, WalError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let (entries, valid_len) = read_entries(path)?;
        let sequence = entries.last().map(|e| e.seq).unwrap_or(0);
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        if file.metadata()?.len() > valid_len {
            file.set_len(valid_len)?;
        }

        Ok(Self { file, sequence })
    }

    /// Append an operation; returns its sequence number
    pub fn append(&mut self, op: &Operation) -> Result<u64, WalError> {
        let entry = WalEntry {
            seq: self.sequence + 1,
            op: op.clone(),
        };
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');
        self.file.write_all(line.as_bytes())?;
        self.file.sync_data()?;

        self.sequence = entry.seq;
        Ok(self.sequence)
    }

    /// Sequence number of the last appended entry
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Replay all operations from the log; a missing log is empty
    pub fn replay(path: &Path) -> Result<Vec<Operation>, WalError> {
        let (entries, _) = read_entries(path)?;
        Ok(entries.into_iter().map(|e| e.op).collect())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WalEntry {
    seq: u64,
    op: Operation,
}

/// Parse every entry, returning them with the byte length of the intact
/// prefix. A final line without a trailing newline is a torn append from
/// a crash and is dropped, even if it parses: its append never returned.
fn read_entries(path: &Path) -> Result<(Vec<WalEntry>, u64), WalError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok((Vec::new(), 0)),
        Err(e) => return Err(e.into()),
    };

    let intact = content.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let (body, tail) = content.split_at(intact);
    if !tail.is_empty() {
        tracing::warn!(path = %path.display(), bytes = tail.len(), "dropping torn WAL tail");
    }

    let mut entries = Vec::new();
    for (index, line) in body.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<WalEntry>(line) {
            Ok(entry) => entries.push(entry),
            Err(source) => {
                return Err(WalError::Corrupt {
                    line: index + 1,
                    source,
                })
            }
        }
    }

    Ok((entries, intact as u64))
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
