//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the UTC calendar date of this timestamp.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Formats as `YYYY-MM-DD HH:MM:SS`, the human-readable form used in
    /// ticket metadata headers.
    pub fn as_header_string(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Formats as the tracker API's `createdAt` wire form.
    pub fn as_wire_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S.000Z").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 6, 9, 14, 49, 11).unwrap())
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_from_datetime_preserves_value() {
        let dt = Utc::now();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.as_datetime(), &dt);
    }

    #[test]
    fn timestamp_date_drops_time_of_day() {
        let ts = fixed();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());
    }

    #[test]
    fn timestamp_ordering_works() {
        let ts1 = fixed();
        let ts2 = ts1.add_days(1);

        assert!(ts1.is_before(&ts2));
        assert!(ts2.is_after(&ts1));
        assert!(ts1 < ts2);
    }

    #[test]
    fn add_days_handles_negative_values() {
        let ts = fixed();
        assert_eq!(ts.add_days(-9).date(), NaiveDate::from_ymd_opt(2025, 5, 31).unwrap());
    }

    #[test]
    fn header_string_matches_expected_format() {
        assert_eq!(fixed().as_header_string(), "2025-06-09 14:49:11");
    }

    #[test]
    fn wire_string_matches_tracker_format() {
        assert_eq!(fixed().as_wire_string(), "2025-06-09T14:49:11.000Z");
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let json = serde_json::to_string(&fixed()).unwrap();
        assert!(json.contains("2025-06-09"));
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let ts: Timestamp = serde_json::from_str("\"2025-06-09T14:49:11Z\"").unwrap();
        assert_eq!(ts, fixed());
    }
}
