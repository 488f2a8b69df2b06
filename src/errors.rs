//! Error types for bootwarm.
//!
//! Only process-fatal conditions surface as errors: a record store that
//! cannot be opened, a failed fork, or argv that cannot cross the exec
//! boundary. Per-file warming failures are policy-level non-events and
//! never appear here. Allocation failure (list growth, warming buffer)
//! aborts the process, which is the documented fatal behavior for it.
//!
//! The binary renders any `BootwarmError` as `Error: <description>.` on
//! stdout and exits non-zero.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type BootwarmResult<T> = Result<T, BootwarmError>;

/// Process-fatal preload failures.
#[derive(Debug, Error)]
pub enum BootwarmError {
    /// The persisted record store could not be opened.
    #[error("cannot open record store {}: {source}", path.display())]
    RecordStore {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `fork()` failed, so init could not be started.
    #[error("fork failed: {0}")]
    Fork(nix::Error),

    /// The init path or a forwarded argument contains an interior NUL
    /// byte and cannot be passed to exec.
    #[error("init argument contains an interior NUL byte")]
    NulInArgv,
}
