// Derived expiration info for items

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Items expiring within this many days are flagged as soon
pub const SOON_THRESHOLD_DAYS: i64 = 7;

/// How far away an expiration date is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    NoDate,
    Expired,
    Today,
    Tomorrow,
    InDays(i64),
}

impl Expiry {
    /// Classify an optional expiration date relative to `now`
    pub fn of(date: Option<NaiveDate>, now: DateTime<Utc>) -> Self {
        match date.map(|d| days_until(d, now)) {
            None => Expiry::NoDate,
            Some(days) if days < 0 => Expiry::Expired,
            Some(0) => Expiry::Today,
            Some(1) => Expiry::Tomorrow,
            Some(days) => Expiry::InDays(days),
        }
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiry::NoDate => write!(f, "no date"),
            Expiry::Expired => write!(f, "expired"),
            Expiry::Today => write!(f, "today"),
            Expiry::Tomorrow => write!(f, "tomorrow"),
            Expiry::InDays(days) => write!(f, "in {} days", days),
        }
    }
}

/// Urgency bucket used when rendering a date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryLevel {
    None,
    Expired,
    Soon,
    Fresh,
}

impl ExpiryLevel {
    pub fn of(date: Option<NaiveDate>, now: DateTime<Utc>) -> Self {
        match date.map(|d| days_until(d, now)) {
            None => ExpiryLevel::None,
            Some(days) if days < 0 => ExpiryLevel::Expired,
            Some(days) if days < SOON_THRESHOLD_DAYS => ExpiryLevel::Soon,
            Some(_) => ExpiryLevel::Fresh,
        }
    }
}

/// Whole days from `now` until midnight UTC of `date`, rounded up
pub fn days_until(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let target = date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis();
    let diff = target - now.timestamp_millis();

    // Integer division truncates toward zero, which is already the ceiling for negatives
    let days = diff / DAY_MS;
    if diff % DAY_MS > 0 { days + 1 } else { days }
}

/// Render a date as dd/mm/yyyy
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_date() {
        assert_eq!(Expiry::of(None, noon(2024, 5, 10)), Expiry::NoDate);
        assert_eq!(Expiry::NoDate.to_string(), "no date");
    }

    #[test]
    fn test_today() {
        let now = noon(2024, 5, 10);
        assert_eq!(Expiry::of(Some(date(2024, 5, 10)), now), Expiry::Today);
        assert_eq!(Expiry::Today.to_string(), "today");
    }

    #[test]
    fn test_today_at_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap();
        assert_eq!(days_until(date(2024, 5, 10), now), 0);
    }

    #[test]
    fn test_tomorrow() {
        let now = noon(2024, 5, 10);
        assert_eq!(Expiry::of(Some(date(2024, 5, 11)), now), Expiry::Tomorrow);
        assert_eq!(Expiry::Tomorrow.to_string(), "tomorrow");
    }

    #[test]
    fn test_expired() {
        let now = noon(2024, 5, 10);
        assert_eq!(Expiry::of(Some(date(2024, 5, 5)), now), Expiry::Expired);
        assert_eq!(Expiry::Expired.to_string(), "expired");
    }

    #[test]
    fn test_in_days() {
        let now = noon(2024, 5, 10);
        let expiry = Expiry::of(Some(date(2024, 5, 15)), now);
        assert_eq!(expiry, Expiry::InDays(5));
        assert_eq!(expiry.to_string(), "in 5 days");
    }

    #[test]
    fn test_days_until_rounds_up() {
        let now = noon(2024, 5, 10);
        assert_eq!(days_until(date(2024, 5, 11), now), 1);
        assert_eq!(days_until(date(2024, 5, 9), now), -1);
        assert_eq!(days_until(date(2024, 5, 11), now + Duration::hours(11)), 1);
        assert_eq!(days_until(date(2024, 5, 12), now), 2);
    }

    #[test]
    fn test_expiry_levels() {
        let now = noon(2024, 5, 10);
        assert_eq!(ExpiryLevel::of(None, now), ExpiryLevel::None);
        assert_eq!(ExpiryLevel::of(Some(date(2024, 5, 1)), now), ExpiryLevel::Expired);
        assert_eq!(ExpiryLevel::of(Some(date(2024, 5, 10)), now), ExpiryLevel::Soon);
        assert_eq!(ExpiryLevel::of(Some(date(2024, 5, 16)), now), ExpiryLevel::Soon);
        assert_eq!(ExpiryLevel::of(Some(date(2024, 5, 17)), now), ExpiryLevel::Fresh);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2024, 3, 9)), "09/03/2024");
    }
}
