//! Validity window for cached readings
//!
//! A reading stays valid for a fixed window after it was captured. The
//! comparison is strict: a reading exactly one window old is still fresh.

use chrono::{DateTime, Duration, Utc};

use crate::thresholds::CACHE_VALIDITY_SECONDS;

/// Decides whether a stored reading must be refreshed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    window: Duration,
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self {
            window: Duration::seconds(CACHE_VALIDITY_SECONDS),
        }
    }
}

impl StalenessPolicy {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn from_minutes(minutes: i64) -> Self {
        Self::new(Duration::minutes(minutes))
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// True once more than the window has elapsed between `last_update` and `now`
    pub fn is_stale_at(&self, last_update: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(last_update) > self.window
    }

    /// Same as [`is_stale_at`](Self::is_stale_at) against the current wall clock
    pub fn is_stale(&self, last_update: DateTime<Utc>) -> bool {
        self.is_stale_at(last_update, Utc::now())
    }

    /// Instant after which a reading captured at `last_update` is stale
    pub fn expires_at(&self, last_update: DateTime<Utc>) -> DateTime<Utc> {
        last_update + self.window
    }
}

/// Staleness check with the default one hour window.
///
/// `now` defaults to the current time; pass it explicitly for reproducible results.
pub fn is_stale(last_update: DateTime<Utc>, now: Option<DateTime<Utc>>) -> bool {
    let policy = StalenessPolicy::default();
    match now {
        Some(now) => policy.is_stale_at(last_update, now),
        None => policy.is_stale(last_update),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_default_window_is_one_hour() {
        assert_eq!(StalenessPolicy::default().window(), Duration::hours(1));
    }

    #[test]
    fn test_fresh_before_window() {
        let now = noon();
        assert!(!is_stale(now - Duration::minutes(59), Some(now)));
    }

    #[test]
    fn test_stale_after_window() {
        let now = noon();
        assert!(is_stale(now - Duration::minutes(61), Some(now)));
    }

    #[test]
    fn test_exact_window_is_fresh() {
        let now = noon();
        assert!(!is_stale(now - Duration::minutes(60), Some(now)));
    }

    #[test]
    fn test_one_millisecond_past_window_is_stale() {
        let now = noon();
        let last = now - Duration::minutes(60) - Duration::milliseconds(1);
        assert!(is_stale(last, Some(now)));
    }

    #[test]
    fn test_future_timestamp_is_fresh() {
        let now = noon();
        assert!(!is_stale(now + Duration::minutes(5), Some(now)));
    }

    #[test]
    fn test_custom_window() {
        let policy = StalenessPolicy::from_minutes(10);
        let now = noon();
        assert!(!policy.is_stale_at(now - Duration::minutes(10), now));
        assert!(policy.is_stale_at(now - Duration::minutes(11), now));
        assert_eq!(policy.expires_at(now), now + Duration::minutes(10));
    }

    #[test]
    fn test_wall_clock_form() {
        assert!(!is_stale(Utc::now(), None));
        assert!(is_stale(Utc::now() - Duration::hours(2), None));
    }
}
