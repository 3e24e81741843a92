//! # Slot Generation
//!
//! Cuts an availability window into fixed-length candidate slots whose starts
//! sit on a regular grid (every 30 minutes from the Unix epoch by default, so
//! `:00` and `:30` in UTC). Consecutive candidates are one step apart, which
//! means candidates longer than the step overlap each other.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Duration, Utc};

use crate::models::window::TimeWindow;

pub const DEFAULT_SLOT_STEP_MINUTES: i64 = 30;
pub const DEFAULT_SLOT_CACHE_CAPACITY: usize = 1000;

/// Earliest instant `>= instant` that is a whole number of `step`s from the epoch.
pub fn align_up(instant: DateTime<Utc>, step: Duration) -> Option<DateTime<Utc>> {
    let step_ms = step.num_milliseconds();
    if step_ms <= 0 {
        return Some(instant);
    }

    let floor_ms = instant.timestamp_millis().div_euclid(step_ms) * step_ms;
    let floor = DateTime::from_timestamp_millis(floor_ms)?;
    if floor == instant {
        Some(instant)
    } else {
        floor.checked_add_signed(step)
    }
}

/// Lazily yields the aligned candidates of `duration` inside a window, ascending.
#[derive(Debug, Clone)]
pub struct CandidateSlots {
    next_start: Option<DateTime<Utc>>,
    window_end: DateTime<Utc>,
    duration: Duration,
    step: Duration,
}

impl CandidateSlots {
    pub fn new(window: TimeWindow, duration: Duration, step: Duration) -> Self {
        let usable = duration > Duration::zero() && step > Duration::zero() && duration <= window.duration();
        Self {
            next_start: if usable { align_up(window.start(), step) } else { None },
            window_end: window.end(),
            duration,
            step,
        }
    }
}

impl Iterator for CandidateSlots {
    type Item = TimeWindow;

    fn next(&mut self) -> Option<TimeWindow> {
        let start = self.next_start?;
        let end = start.checked_add_signed(self.duration)?;
        if end > self.window_end {
            self.next_start = None;
            return None;
        }

        self.next_start = start.checked_add_signed(self.step);
        TimeWindow::new(start, end).ok()
    }
}

type SlotKey = (TimeWindow, Duration);

/// Bounded memo of generated candidate lists.
///
/// Eviction is coarse: once `capacity` entries are held, the next insert
/// clears everything first. A capacity of zero stores nothing.
#[derive(Debug)]
pub struct SlotCache {
    capacity: usize,
    entries: Mutex<HashMap<SlotKey, Arc<[TimeWindow]>>>,
}

impl SlotCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, key: &SlotKey) -> Option<Arc<[TimeWindow]>> {
        // A poisoned lock only costs us the memo, so it reads as a miss.
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn insert(&self, key: SlotKey, slots: Arc<[TimeWindow]>) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            if entries.len() >= self.capacity {
                tracing::debug!(entries = entries.len(), "slot cache full, clearing");
                entries.clear();
            }
            entries.insert(key, slots);
        }
    }
}

/// Produces candidate slots on a fixed grid, memoizing by `(window, duration)`.
#[derive(Debug)]
pub struct SlotGenerator {
    step: Duration,
    cache: Option<SlotCache>,
}

impl Default for SlotGenerator {
    fn default() -> Self {
        Self::new(
            Duration::minutes(DEFAULT_SLOT_STEP_MINUTES),
            DEFAULT_SLOT_CACHE_CAPACITY,
        )
    }
}

impl SlotGenerator {
    pub fn new(step: Duration, cache_capacity: usize) -> Self {
        Self {
            step,
            cache: (cache_capacity > 0).then(|| SlotCache::new(cache_capacity)),
        }
    }

    pub fn uncached(step: Duration) -> Self {
        Self { step, cache: None }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn cache(&self) -> Option<&SlotCache> {
        self.cache.as_ref()
    }

    pub fn generate(&self, window: TimeWindow, duration: Duration) -> Arc<[TimeWindow]> {
        let Some(cache) = &self.cache else {
            return CandidateSlots::new(window, duration, self.step).collect();
        };

        let key = (window, duration);
        if let Some(slots) = cache.get(&key) {
            return slots;
        }

        let slots: Arc<[TimeWindow]> = CandidateSlots::new(window, duration, self.step).collect();
        cache.insert(key, Arc::clone(&slots));
        slots
    }
}
