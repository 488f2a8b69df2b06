//! Preload configuration.
//!
//! All knobs are compile-time constants; `PreloadConfig` only re-packages
//! them as a value so the scheduler can be pointed at temporary paths in
//! tests. There are no flags and no config files.

use std::path::PathBuf;

/// Record store written by the access recorder during a previous boot.
pub const RECORD_STORE_PATH: &str = "/var/lib/e4rat/startup.log";

/// Init program the child process execs into after the early phase.
pub const INIT_PROGRAM: &str = "/bin/systemd";

/// Ceiling on the number of files warmed before init is started.
pub const EARLY_LIMIT: usize = 1000;

/// Fraction of the list warmed early, subject to [`EARLY_LIMIT`].
pub const EARLY_FRACTION: f64 = 0.33;

/// Stride for background warming after the handoff.
pub const CHUNK_SIZE: usize = 100;

/// Content read buffer size (1 MiB), allocated once per warming phase.
pub const READ_BUF_SIZE: usize = 1024 * 1024;

/// Paths and limits for one preload run.
#[derive(Debug, Clone)]
pub struct PreloadConfig {
    /// Path of the persisted record store.
    pub record_store: PathBuf,
    /// Program the forked child execs into.
    pub init_program: PathBuf,
    /// Early-phase file count ceiling.
    pub early_limit: usize,
    /// Background chunk stride.
    pub chunk_size: usize,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            record_store: PathBuf::from(RECORD_STORE_PATH),
            init_program: PathBuf::from(INIT_PROGRAM),
            early_limit: EARLY_LIMIT,
            chunk_size: CHUNK_SIZE,
        }
    }
}
