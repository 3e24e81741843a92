//! Overlap and containment on half-open windows.
//!
//! Adjacent windows (one ends exactly when the other starts) do NOT overlap.

use crate::models::window::TimeWindow;

/// `a.start < b.end && b.start < a.end`.
pub fn overlaps(a: &TimeWindow, b: &TimeWindow) -> bool {
    a.start() < b.end() && b.start() < a.end()
}

/// `outer.start <= inner.start && outer.end >= inner.end`.
pub fn contains(outer: &TimeWindow, inner: &TimeWindow) -> bool {
    outer.start() <= inner.start() && outer.end() >= inner.end()
}
