//! Freshness decay for vault evidence.
//!
//! A deliberate step function rather than a continuous decay curve:
//! bands are predictable and stable under small time changes, so the
//! composite score never flickers from sub-day timing.

use chrono::{DateTime, Utc};

/// Upper bound (days) of the fully-fresh band.
pub const FRESH_DAYS: i64 = 30;
/// Upper bound (days) of the recent band.
pub const RECENT_DAYS: i64 = 90;
/// Upper bound (days) of the aging band; anything older is stale.
pub const AGING_DAYS: i64 = 180;

/// Multiplier applied when evidence is stale or carries no timestamp at
/// all. Missing provenance is itself a signal of low confidence.
pub const STALE_MULTIPLIER: f64 = 0.7;

/// Returns the freshness multiplier for an item's effective timestamp.
///
/// - age <= 30 days -> 1.0
/// - 31..=90 days   -> 0.9
/// - 91..=180 days  -> 0.8
/// - older, or no timestamp -> 0.7
///
/// A timestamp in the future counts as age zero.
pub fn freshness_multiplier(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(ts) = timestamp else {
        return STALE_MULTIPLIER;
    };
    let age_days = (now - ts).num_days().max(0);
    if age_days <= FRESH_DAYS {
        1.0
    } else if age_days <= RECENT_DAYS {
        0.9
    } else if age_days <= AGING_DAYS {
        0.8
    } else {
        STALE_MULTIPLIER
    }
}

/// True when an item's effective age is past the lowest freshness band.
/// Shared with the mission generator so the stale boundary cannot drift.
pub fn is_stale(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match timestamp {
        Some(ts) => (now - ts).num_days() > AGING_DAYS,
        None => true,
    }
}
