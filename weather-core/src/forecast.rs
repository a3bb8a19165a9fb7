//! Reduction of the 3-hourly forecast list to roughly one sample per day.
//!
//! The selection is positional: every 8th raw sample (8 x 3h = 24h) starting
//! at index 0, at most [`MAX_DAYS`] of them. It is not aligned to local
//! midnight, so depending on when the provider's list starts, two picked
//! samples can fall on the same calendar date or a date can be skipped.

/// Raw samples per day at the provider's 3-hour granularity.
pub const SAMPLES_PER_DAY: usize = 8;

/// Upper bound on the number of daily entries.
pub const MAX_DAYS: usize = 5;

/// Pick one sample per day from a chronologically ordered raw list.
pub fn daily_samples<T>(samples: impl IntoIterator<Item = T>) -> Vec<T> {
    samples
        .into_iter()
        .step_by(SAMPLES_PER_DAY)
        .take(MAX_DAYS)
        .collect()
}
