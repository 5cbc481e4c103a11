use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

/// A recurring scheduled activity. Start/end times are free text
/// (e.g. "06:30 AM"); parsing happens only at sort time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoutineItem {
    pub id: i64,
    pub name: String,
    pub time_start: String,
    pub time_end: Option<String>,
    pub routine_type: RoutineKind,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl RoutineItem {
    /// Start time parsed as 12-hour clock with meridiem. Anything that
    /// fails to parse sorts as midnight, the earliest possible time.
    pub fn parsed_time_start(&self) -> NaiveTime {
        parse_clock_time(&self.time_start)
    }
}

pub fn parse_clock_time(raw: &str) -> NaiveTime {
    NaiveTime::parse_from_str(raw.trim(), "%I:%M %p").unwrap_or(NaiveTime::MIN)
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
pub enum RoutineKind {
    Weekday,
    Weekend,
}

impl RoutineKind {
    /// Saturday and Sunday are weekend; the other five days are weekday.
    pub fn for_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => RoutineKind::Weekend,
            _ => RoutineKind::Weekday,
        }
    }
}

impl FromStr for RoutineKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Weekday" => Ok(RoutineKind::Weekday),
            "Weekend" => Ok(RoutineKind::Weekend),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoutineRequest {
    pub name: String,
    pub time_start: String,
    pub routine_type: RoutineKind,
    pub time_end: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturday_is_weekend() {
        let sat = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(RoutineKind::for_date(sat), RoutineKind::Weekend);
    }

    #[test]
    fn test_sunday_is_weekend() {
        let sun = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        assert_eq!(RoutineKind::for_date(sun), RoutineKind::Weekend);
    }

    #[test]
    fn test_monday_through_friday_are_weekday() {
        // 2024-06-10 is a Monday
        for offset in 0..5 {
            let d = NaiveDate::from_ymd_opt(2024, 6, 10 + offset).unwrap();
            assert_eq!(RoutineKind::for_date(d), RoutineKind::Weekday);
        }
    }

    #[test]
    fn test_parse_clock_time_morning() {
        assert_eq!(
            parse_clock_time("06:30 AM"),
            NaiveTime::from_hms_opt(6, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_clock_time_afternoon() {
        assert_eq!(
            parse_clock_time("04:45 PM"),
            NaiveTime::from_hms_opt(16, 45, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_clock_time_garbage_falls_back_to_midnight() {
        assert_eq!(parse_clock_time("whenever"), NaiveTime::MIN);
        assert_eq!(parse_clock_time(""), NaiveTime::MIN);
        assert_eq!(parse_clock_time("25:99"), NaiveTime::MIN);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Weekday".parse(), Ok(RoutineKind::Weekday));
        assert_eq!("Weekend".parse(), Ok(RoutineKind::Weekend));
        assert_eq!("weekend".parse::<RoutineKind>(), Err(()));
    }

    #[test]
    fn test_weekday_sorts_before_weekend() {
        assert!(RoutineKind::Weekday < RoutineKind::Weekend);
    }
}
