//! Preload scheduler.
//!
//! Straight-line sequential state machine:
//!
//! ```text
//! Initializing → EarlyLoad → Handoff → BackgroundLoad → Done
//! ```
//!
//! The early phase is capped at the smaller of a third of the list or
//! [`config::EARLY_LIMIT`] files, so warming can shorten boot without
//! delaying the moment init starts by more than a bounded amount. After
//! the fork, the parent walks the rest of the list in fixed strides,
//! metadata then content per chunk, which keeps inode and content reads
//! for a run of recency-adjacent files close together in time and bounds
//! the IO burst to one chunk.
//!
//! Metadata is always warmed through the locality order (ascending
//! device/inode, fewer inode-table block reads); content is always warmed
//! in original order, which matches the access pattern about to re-occur.

use std::cmp::min;
use std::ffi::OsString;
use std::ops::Range;

use crate::config::{EARLY_FRACTION, PreloadConfig};
use crate::errors::BootwarmResult;
use crate::handoff::{InitHandoff, Role};
use crate::order::sort_by_locality;
use crate::record;
use crate::warm::{WarmStats, Warmer};

/// Counters from one completed run, split by phase.
///
/// Exists for tests and debug logging; a normal run never reports it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PreloadReport {
    /// Records parsed from the store.
    pub total: usize,
    /// Records warmed before the handoff.
    pub early_count: usize,
    /// Background chunks processed (zero on the child path).
    pub chunks: usize,
    /// Early-phase warming counters.
    pub early: WarmStats,
    /// Background-phase warming counters.
    pub background: WarmStats,
}

/// Number of records to warm before starting init.
pub fn early_count(total: usize, limit: usize) -> usize {
    min((total as f64 * EARLY_FRACTION) as usize, limit)
}

/// Chunk index ranges covering `[start, end)` in `chunk_size` strides,
/// with the final chunk clamped to `end`.
fn chunk_ranges(start: usize, end: usize, chunk_size: usize) -> impl Iterator<Item = Range<usize>> {
    let stride = chunk_size.max(1);
    (start..end)
        .step_by(stride)
        .map(move |i| i..min(i + stride, end))
}

/// Run the whole preload pipeline: load and order the record list, warm
/// the early subset, hand off to init, then warm the remainder in chunks.
///
/// In the process that became the fork's child, returns right after the
/// handoff with an empty background report (in practice the child never
/// gets that far, since exec replaces its image). Fatal conditions (an
/// unopenable record store, a failed fork, argv that cannot cross the
/// exec boundary) surface as errors; everything per-file is silently
/// best-effort.
pub fn run(
    config: &PreloadConfig,
    handoff: &dyn InitHandoff,
    argv: &[OsString],
) -> BootwarmResult<PreloadReport> {
    // Initializing: both orderings live for the rest of the run and are
    // only ever indexed after this point.
    let records = record::load(&config.record_store)?;
    let by_locality = sort_by_locality(&records);
    let total = records.len();
    let early = early_count(total, config.early_limit);
    tracing::info!(files = total, early, "preloading");

    // EarlyLoad: metadata by locality, content by original order. The
    // warmer (and its buffer) is scoped to the phase.
    let early_stats = {
        let mut warmer = Warmer::new();
        warmer.warm_metadata(by_locality[..early].iter().copied());
        warmer.warm_content(&records[..early]);
        warmer.into_stats()
    };

    // Handoff: the child heads for exec, the parent keeps warming.
    if handoff.handoff(argv)? == Role::ChildBecameInit {
        return Ok(PreloadReport {
            total,
            early_count: early,
            chunks: 0,
            early: early_stats,
            background: WarmStats::default(),
        });
    }

    // BackgroundLoad: remaining records in fixed strides, metadata then
    // content per chunk.
    let mut warmer = Warmer::new();
    let mut chunks = 0;
    for range in chunk_ranges(early, total, config.chunk_size) {
        warmer.warm_metadata(by_locality[range.clone()].iter().copied());
        warmer.warm_content(&records[range]);
        chunks += 1;
    }
    let background = warmer.into_stats();

    // Done: lists drop here; the binary exits 0.
    tracing::debug!(chunks, ?background, "background preload complete");
    Ok(PreloadReport {
        total,
        early_count: early,
        chunks,
        early: early_stats,
        background,
    })
}
