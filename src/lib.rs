//! Boot-time filesystem cache preloader.
//!
//! Warms the kernel inode cache and page cache for the set of files a
//! previous boot was observed to touch, then hands control to init without
//! blocking it on full preload completion.
//!
//! ## Pipeline
//!
//! ```text
//! record store ──→ RecordList (original order) ──┐
//!                     │                          │
//!                     └─→ LocalityOrder          │
//!                         (device, inode)        │
//!                                                ▼
//!                    scheduler: EarlyLoad → Handoff → BackgroundLoad
//!                                 │            │            │
//!                              Warmer     fork + exec    Warmer
//!                                           init        (chunked)
//! ```
//!
//! Early warming is bounded so init is never delayed by more than a capped
//! amount of work; everything past the cap is loaded in fixed-size chunks
//! after the fork, in a process that runs alongside init. Preloading is
//! purely advisory: per-file failures are swallowed, and neither process
//! waits on the other.

pub mod config;
pub mod errors;
pub mod handoff;
pub mod order;
pub mod record;
pub mod scheduler;
pub mod warm;

pub use config::PreloadConfig;
pub use errors::{BootwarmError, BootwarmResult};
pub use handoff::{ForkExecHandoff, InitHandoff, Role};
pub use record::FileRecord;
pub use scheduler::{PreloadReport, run};
pub use warm::{WarmStats, Warmer};
