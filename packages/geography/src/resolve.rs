//! Nearest-area assignment for event records.

use borough_trends_models::{Event, ResolvedEvent};

use crate::AreaIndex;
use crate::progress::ProgressCallback;

/// How often the progress bar advances during the resolver scan.
const PROGRESS_CHUNK: u64 = 1024;

/// The outcome of resolving one event dataset against an area index.
#[derive(Debug)]
pub struct Resolution {
    /// Events annotated with their nearest area's code.
    pub events: Vec<ResolvedEvent>,
    /// Events dropped for non-finite coordinates.
    pub dropped: usize,
}

/// Assigns every event the code of its nearest area.
///
/// The readers already exclude records with missing or non-numeric
/// coordinates; this guards against non-finite values surviving arithmetic
/// upstream. Such events are dropped and counted, never silently included.
///
/// Complexity is O(events x areas) by brute-force scan.
#[must_use]
pub fn resolve_events(
    events: Vec<Event>,
    index: &AreaIndex,
    progress: &dyn ProgressCallback,
) -> Resolution {
    let total = events.len() as u64;
    progress.set_total(total);

    let mut resolved = Vec::with_capacity(events.len());
    let mut dropped = 0;

    for (i, event) in events.into_iter().enumerate() {
        if (i as u64) % PROGRESS_CHUNK == 0 && i > 0 {
            progress.inc(PROGRESS_CHUNK);
        }

        if !event.longitude.is_finite() || !event.latitude.is_finite() {
            dropped += 1;
            continue;
        }

        let area_code = index.nearest(event.longitude, event.latitude).to_string();
        resolved.push(ResolvedEvent { area_code, event });
    }

    // The final (possibly partial) chunk, so the bar always reaches its total.
    let remainder = total % PROGRESS_CHUNK;
    if remainder > 0 {
        progress.inc(remainder);
    } else if total > 0 {
        progress.inc(PROGRESS_CHUNK);
    }

    progress.finish(format!("Resolved {} event(s)", resolved.len()));

    if dropped > 0 {
        log::warn!("Dropped {dropped} event(s) with non-finite coordinates");
    }

    Resolution {
        events: resolved,
        dropped,
    }
}
