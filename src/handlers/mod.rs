pub mod analytics;
pub mod dashboard;
pub mod diary;
pub mod health;
pub mod photos;
pub mod reminders;
pub mod routines;
pub mod tracker;

use chrono::{NaiveDate, Utc};

/// Resolve an optional `YYYY-MM-DD` string to a date. Absent or
/// malformed input falls back to today (silent recovery, not an error).
pub fn resolve_date(raw: Option<&str>) -> NaiveDate {
    raw.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or_else(|| Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_date_valid() {
        assert_eq!(
            resolve_date(Some("2024-06-15")),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_resolve_date_malformed_falls_back_to_today() {
        let today = Utc::now().date_naive();
        assert_eq!(resolve_date(Some("not-a-date")), today);
        assert_eq!(resolve_date(Some("2024-13-99")), today);
        assert_eq!(resolve_date(Some("")), today);
    }

    #[test]
    fn test_resolve_date_absent_is_today() {
        assert_eq!(resolve_date(None), Utc::now().date_naive());
    }
}
