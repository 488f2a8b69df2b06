//! Cache warming primitives.
//!
//! Warming is a best-effort cache hint, not a correctness-critical read:
//! every per-file failure (missing path, open failure, read error) is
//! swallowed and only reflected in [`WarmStats`]. The counters are the
//! optional visibility channel for tests and debug logging; the default
//! behavior stays silent.

use std::fs::File;
use std::io::{ErrorKind, Read};

use nix::sys::stat::stat;

use crate::config::READ_BUF_SIZE;
use crate::record::FileRecord;

/// Counters for one warming phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WarmStats {
    /// Metadata lookups issued.
    pub metadata_probed: u64,
    /// Metadata lookups that failed (missing or inaccessible file).
    pub metadata_missing: u64,
    /// Files whose content was read to EOF.
    pub content_loaded: u64,
    /// Files skipped because the open failed.
    pub content_skipped: u64,
    /// Total content bytes pulled into the page cache.
    pub bytes_read: u64,
}

/// Performs the stat and read calls that populate kernel caches.
///
/// Owns one content read buffer, allocated at construction and reused for
/// every file of the phase the warmer is scoped to. Buffer allocation
/// failure aborts the process.
pub struct Warmer {
    buf: Vec<u8>,
    stats: WarmStats,
}

impl Warmer {
    /// Warmer with the standard 1 MiB content buffer.
    pub fn new() -> Self {
        Self::with_buffer_size(READ_BUF_SIZE)
    }

    /// Warmer with a caller-chosen buffer size (tests use small buffers to
    /// exercise the read loop).
    pub fn with_buffer_size(size: usize) -> Self {
        Self {
            buf: vec![0; size],
            stats: WarmStats::default(),
        }
    }

    /// Pull inode metadata into the inode cache, one lookup per record in
    /// iteration order. Failures are counted and otherwise ignored.
    pub fn warm_metadata<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a FileRecord>,
    {
        for record in records {
            self.stats.metadata_probed += 1;
            if stat(record.path.as_path()).is_err() {
                self.stats.metadata_missing += 1;
            }
        }
    }

    /// Pull file content into the page cache, one file per record in
    /// iteration order. Each file is read to EOF through the shared buffer
    /// and the bytes are discarded; a read error mid-file ends that file
    /// like EOF would.
    pub fn warm_content<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a FileRecord>,
    {
        for record in records {
            let Ok(mut file) = File::open(&record.path) else {
                self.stats.content_skipped += 1;
                continue;
            };
            loop {
                match file.read(&mut self.buf) {
                    Ok(0) => break,
                    Ok(n) => self.stats.bytes_read += n as u64,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(_) => break,
                }
            }
            self.stats.content_loaded += 1;
        }
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> WarmStats {
        self.stats
    }

    /// Consume the warmer, releasing the buffer and yielding its counters.
    pub fn into_stats(self) -> WarmStats {
        self.stats
    }
}

impl Default for Warmer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn record(path: PathBuf) -> FileRecord {
        FileRecord {
            device_id: 1,
            inode_number: 1,
            path,
        }
    }

    #[test]
    fn test_content_read_to_eof_through_small_buffer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data");
        let payload = vec![7u8; 1000];
        std::fs::write(&path, &payload).unwrap();

        let mut warmer = Warmer::with_buffer_size(64);
        warmer.warm_content([&record(path.clone())]);

        let stats = warmer.into_stats();
        assert_eq!(stats.content_loaded, 1);
        assert_eq!(stats.content_skipped, 0);
        assert_eq!(stats.bytes_read, 1000);

        // Warming never mutates the file.
        assert_eq!(std::fs::read(&path).unwrap(), payload);
    }

    #[test]
    fn test_missing_file_skipped_silently_twice() {
        let dir = tempdir().unwrap();
        let missing = record(dir.path().join("gone"));

        let mut warmer = Warmer::with_buffer_size(64);
        warmer.warm_content([&missing]);
        warmer.warm_content([&missing]);

        let stats = warmer.stats();
        assert_eq!(stats.content_skipped, 2);
        assert_eq!(stats.content_loaded, 0);
        assert_eq!(stats.bytes_read, 0);
    }

    #[test]
    fn test_metadata_counts_misses() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("here");
        std::fs::write(&present, b"x").unwrap();

        let mut warmer = Warmer::with_buffer_size(64);
        warmer.warm_metadata([&record(present), &record(dir.path().join("gone"))]);

        let stats = warmer.stats();
        assert_eq!(stats.metadata_probed, 2);
        assert_eq!(stats.metadata_missing, 1);
    }

    #[test]
    fn test_empty_file_counts_as_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty");
        std::fs::write(&path, b"").unwrap();

        let mut warmer = Warmer::with_buffer_size(64);
        warmer.warm_content([&record(path)]);

        let stats = warmer.stats();
        assert_eq!(stats.content_loaded, 1);
        assert_eq!(stats.bytes_read, 0);
    }
}
