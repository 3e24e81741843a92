//! Removes candidate slots that collide with existing bookings.
//!
//! Both inputs are walked once: bookings are sorted by start, and because the
//! candidates arrive in ascending order a cursor into the bookings only ever
//! moves forward.

use super::interval::overlaps;
use crate::models::window::TimeWindow;

/// Returns the candidates (ascending by start) that overlap no booking.
pub fn filter_conflicts(candidates: &[TimeWindow], bookings: &[TimeWindow]) -> Vec<TimeWindow> {
    if bookings.is_empty() {
        return candidates.to_vec();
    }

    let mut sorted = bookings.to_vec();
    sorted.sort_by_key(|booking| booking.start());

    let mut cursor = 0;
    let mut free = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        // Bookings ending by this candidate's start cannot touch any later candidate.
        while cursor < sorted.len() && sorted[cursor].end() <= candidate.start() {
            cursor += 1;
        }

        let conflict = sorted[cursor..]
            .iter()
            .take_while(|booking| booking.start() < candidate.end())
            .any(|booking| overlaps(candidate, booking));

        if !conflict {
            free.push(*candidate);
        }
    }

    free
}
