//! Wall-clock timestamps.
//!
//! The engine's ordering guarantees (§5 of the design doc: monotonically
//! non-decreasing `last_updated_ts`/`last_seen_ts`) are expressed as plain
//! epoch-second arithmetic, matching how the rest of the domain model
//! compares and ages timestamps (`now - last_seen_ts >= max_age_days * 86400`).
//! `chrono` is used only at the edge, to capture wall-clock "now".

use chrono::Utc;

/// Epoch-seconds timestamp, matching the precision the engine reasons about
/// (tick recency, candidate-state aging, topic update times).
pub type Timestamp = f64;

/// Capture the current wall-clock time as epoch seconds.
pub fn now_ts() -> Timestamp {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

pub const SECONDS_PER_DAY: f64 = 86_400.0;
