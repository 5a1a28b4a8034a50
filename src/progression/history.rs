//! Study history queries.

use crate::profile::Profile;
use chrono::{Duration, NaiveDate};

pub const WEEK_DAYS: usize = 7;

/// Minutes studied per UTC calendar day over the week ending at `today`.
///
/// Always seven entries, earliest first, zero-filled.
pub fn weekly_series(profile: &Profile, today: NaiveDate) -> [(NaiveDate, u64); WEEK_DAYS] {
    let start = today - Duration::days(WEEK_DAYS as i64 - 1);
    let mut series = [(start, 0u64); WEEK_DAYS];
    for (offset, entry) in series.iter_mut().enumerate() {
        entry.0 = start + Duration::days(offset as i64);
    }

    for session in &profile.sessions {
        let day = session.timestamp.date_naive();
        let offset = (day - start).num_days();
        if (0..WEEK_DAYS as i64).contains(&offset) {
            series[offset as usize].1 += session.minutes;
        }
    }

    series
}

/// Total minutes studied in the week ending at `today`.
pub fn weekly_total(profile: &Profile, today: NaiveDate) -> u64 {
    weekly_series(profile, today).iter().map(|(_, m)| m).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_empty_history_is_zero_filled() {
        let profile = Profile::default();
        let series = weekly_series(&profile, day(18));
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].0, day(12));
        assert_eq!(series[6].0, day(18));
        assert!(series.iter().all(|(_, m)| *m == 0));
    }

    #[test]
    fn test_dates_strictly_increase() {
        let series = weekly_series(&Profile::default(), day(3));
        for pair in series.windows(2) {
            assert_eq!(pair[1].0 - pair[0].0, Duration::days(1));
        }
        // Crosses the month boundary.
        assert_eq!(series[0].0, NaiveDate::from_ymd_opt(2026, 9, 27).unwrap());
    }

    #[test]
    fn test_buckets_by_day_and_ignores_old_sessions() {
        let mut profile = Profile::default();
        let ts = |d: u32, h: u32| Utc.with_ymd_and_hms(2026, 10, d, h, 0, 0).unwrap();
        profile.record_session("Biology", 30, ts(18, 8));
        profile.record_session("Biology", 15, ts(18, 23));
        profile.record_session("AMC Math", 45, ts(12, 0));
        profile.record_session("AMC Math", 60, ts(11, 23)); // outside the window
        profile.record_session("AMC Math", 5, ts(19, 1)); // after today

        let series = weekly_series(&profile, day(18));
        assert_eq!(series[6], (day(18), 45));
        assert_eq!(series[0], (day(12), 45));
        assert_eq!(weekly_total(&profile, day(18)), 90);
    }

    #[test]
    fn test_query_does_not_mutate() {
        let mut profile = Profile::default();
        profile.record_session("Psychology", 20, Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap());
        let before = profile.clone();
        let first = weekly_series(&profile, day(18));
        let second = weekly_series(&profile, day(18));
        assert_eq!(first, second);
        assert_eq!(profile, before);
    }
}
