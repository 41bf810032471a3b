//! Participant entity - a user currently present in the room

use chrono::{DateTime, Duration, Utc};

/// Participant entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub last_seen: DateTime<Utc>,
}

impl Participant {
    /// Create a participant seen at `now`
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            last_seen: now,
        }
    }

    /// Record a heartbeat
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen = now;
    }

    /// Last-seen time as milliseconds since the Unix epoch
    #[inline]
    pub fn last_seen_millis(&self) -> i64 {
        self.last_seen.timestamp_millis()
    }

    /// Check if the participant has been idle at or past `cutoff`
    #[inline]
    pub fn is_stale(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_seen <= cutoff
    }

    /// Compute the eviction cutoff for an idle threshold
    ///
    /// Saturates at the earliest representable instant, so an absurd
    /// threshold evicts nobody instead of overflowing.
    pub fn stale_cutoff(now: DateTime<Utc>, idle_threshold: Duration) -> DateTime<Utc> {
        now.checked_sub_signed(idle_threshold)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
