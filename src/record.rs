//! Record store reader.
//!
//! Parses the persisted file-access list written by the recorder during a
//! previous boot. One record per line:
//!
//! ```text
//! <device_id:decimal> ' ' <inode_number:decimal> ' ' <path-to-end-of-line>
//! ```
//!
//! Example: `2049 2223875 /bin/bash`
//!
//! Paths are taken verbatim up to the newline, so they may contain spaces
//! but no escaping is supported. Malformed lines are dropped silently; the
//! list is advisory and a few bad entries must never stop a boot.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use crate::errors::{BootwarmError, BootwarmResult};

/// One file accessed during a previous boot.
///
/// Immutable once parsed; `path` serves both the metadata lookup and the
/// content read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Block device holding the file.
    pub device_id: u64,
    /// Inode number on that device.
    pub inode_number: u64,
    /// Absolute path, arbitrary bytes (not required to be UTF-8).
    pub path: PathBuf,
}

impl FileRecord {
    /// Parse one record-store line (without its trailing newline).
    ///
    /// Returns `None` for any line that does not match the grammar: an
    /// empty or overflowing digit run, a missing space separator, or an
    /// empty path.
    pub fn parse(line: &[u8]) -> Option<Self> {
        let (device_id, rest) = split_digits(line)?;
        let rest = rest.strip_prefix(b" ")?;
        let (inode_number, rest) = split_digits(rest)?;
        let path = rest.strip_prefix(b" ")?;
        if path.is_empty() {
            return None;
        }

        Some(Self {
            device_id,
            inode_number,
            path: PathBuf::from(std::ffi::OsStr::from_bytes(path)),
        })
    }
}

/// Consume a leading non-empty decimal digit run.
fn split_digits(input: &[u8]) -> Option<(u64, &[u8])> {
    let len = input
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(input.len());
    if len == 0 {
        return None;
    }

    // The run is pure ASCII digits, so the UTF-8 conversion cannot fail;
    // the parse still can, on u64 overflow.
    let value = std::str::from_utf8(&input[..len]).ok()?.parse().ok()?;
    Some((value, &input[len..]))
}

/// Load the record store, preserving line order.
///
/// Fails only if the store cannot be opened. Lines are read as raw bytes
/// so non-UTF-8 paths survive; a read error mid-stream ends the list early
/// instead of failing the run.
pub fn load(path: &Path) -> BootwarmResult<Vec<FileRecord>> {
    let file = File::open(path).map_err(|source| BootwarmError::RecordStore {
        path: path.to_owned(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if let Some(record) = FileRecord::parse(&line) {
            records.push(record);
        }
    }

    tracing::debug!(path = %path.display(), files = records.len(), "loaded record store");
    Ok(records)
}
