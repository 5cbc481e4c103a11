//! The daily dashboard: for one calendar date, the applicable routine
//! set annotated with completion state, a derived score, and a 5-day
//! navigation window. Read-only; recomputed from scratch per request.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::AppResult;
use crate::handlers::resolve_date;
use crate::models::reminder::Reminder;
use crate::models::routine::{RoutineItem, RoutineKind};
use crate::models::setting::{DEFAULT_TARGET_SCORE, TARGET_SCORE_KEY};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub date: NaiveDate,
    pub day_name: String,
    pub routine_type: RoutineKind,
    pub week_dates: Vec<DayCell>,
    pub items: Vec<AnnotatedItem>,
    pub score: i64,
    pub target_score: i64,
    pub pinned: Option<String>,
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day_name: String,
    pub day_num: String,
    pub is_current: bool,
}

#[derive(Debug, Serialize)]
pub struct AnnotatedItem {
    #[serde(flatten)]
    pub item: RoutineItem,
    pub completed: bool,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardView>> {
    let current_date = resolve_date(query.date.as_deref());
    let kind = RoutineKind::for_date(current_date);

    let routines = state.store.routines_for_kind(kind).await?;

    let logs = state.store.tracker_logs_for_date(current_date).await?;
    let completed_ids: HashSet<i64> = logs
        .iter()
        .filter(|log| log.status)
        .map(|log| log.routine_item_id)
        .collect();

    let mut items: Vec<AnnotatedItem> = routines
        .into_iter()
        .map(|item| AnnotatedItem {
            completed: completed_ids.contains(&item.id),
            item,
        })
        .collect();
    sort_for_display(&mut items);

    let completed = items.iter().filter(|i| i.completed).count();
    let score = completion_score(completed, items.len());

    let pinned = state
        .store
        .diary_entry_for_date(current_date)
        .await?
        .and_then(|entry| entry.pinned_text);

    let reminders = state.store.reminders_for_date(current_date).await?;

    let target_score = state
        .store
        .setting(TARGET_SCORE_KEY)
        .await?
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TARGET_SCORE);

    Ok(Json(DashboardView {
        date: current_date,
        day_name: current_date.format("%A").to_string(),
        routine_type: kind,
        week_dates: navigation_window(current_date),
        items,
        score,
        target_score,
        pinned,
        reminders,
    }))
}

/// Completed items first, each group ascending by parsed start time.
/// Stable, so equal keys keep their original relative order.
fn sort_for_display(items: &mut [AnnotatedItem]) {
    items.sort_by_key(|a| (!a.completed, a.item.parsed_time_start()));
}

/// Floor percentage of completed over applicable; 0 with no items.
fn completion_score(completed: usize, total: usize) -> i64 {
    if total == 0 {
        0
    } else {
        (completed * 100 / total) as i64
    }
}

/// The 5 dates from current−2 through current+2, flagged on the
/// requested date.
fn navigation_window(current: NaiveDate) -> Vec<DayCell> {
    (-2..=2)
        .map(|offset| {
            let d = current + Duration::days(offset);
            DayCell {
                date: d,
                day_name: d.format("%a").to_string(),
                day_num: d.format("%d").to_string(),
                is_current: d == current,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, time_start: &str) -> RoutineItem {
        RoutineItem {
            id,
            name: format!("item-{id}"),
            time_start: time_start.into(),
            time_end: None,
            routine_type: RoutineKind::Weekday,
            category: None,
            description: None,
        }
    }

    fn annotated(id: i64, time_start: &str, completed: bool) -> AnnotatedItem {
        AnnotatedItem {
            item: item(id, time_start),
            completed,
        }
    }

    // ── sort_for_display ─────────────────────────────────────────────

    #[test]
    fn test_completed_sort_before_incomplete() {
        let mut items = vec![
            annotated(1, "06:00 AM", false),
            annotated(2, "09:00 PM", true),
            annotated(3, "07:00 AM", false),
        ];
        sort_for_display(&mut items);
        let ids: Vec<i64> = items.iter().map(|a| a.item.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_groups_sort_ascending_by_time() {
        let mut items = vec![
            annotated(1, "08:30 PM", true),
            annotated(2, "06:30 AM", true),
            annotated(3, "12:30 PM", true),
        ];
        sort_for_display(&mut items);
        let ids: Vec<i64> = items.iter().map(|a| a.item.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_unparsable_time_sorts_first_in_its_group() {
        let mut items = vec![
            annotated(1, "06:00 AM", false),
            annotated(2, "whenever", false),
            annotated(3, "05:00 AM", true),
        ];
        sort_for_display(&mut items);
        let ids: Vec<i64> = items.iter().map(|a| a.item.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut items = vec![
            annotated(1, "garbage", false),
            annotated(2, "nonsense", false),
            annotated(3, "???", false),
        ];
        sort_for_display(&mut items);
        let ids: Vec<i64> = items.iter().map(|a| a.item.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    // ── completion_score ─────────────────────────────────────────────

    #[test]
    fn test_score_zero_with_no_items() {
        assert_eq!(completion_score(0, 0), 0);
    }

    #[test]
    fn test_score_rounds_down() {
        assert_eq!(completion_score(1, 3), 33);
        assert_eq!(completion_score(2, 3), 66);
        assert_eq!(completion_score(3, 3), 100);
    }

    // ── navigation_window ────────────────────────────────────────────

    #[test]
    fn test_window_centers_on_requested_date() {
        let current = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let window = navigation_window(current);
        assert_eq!(window.len(), 5);

        let dates: Vec<String> = window.iter().map(|c| c.date.to_string()).collect();
        assert_eq!(
            dates,
            vec![
                "2024-06-13",
                "2024-06-14",
                "2024-06-15",
                "2024-06-16",
                "2024-06-17",
            ]
        );

        let flags: Vec<bool> = window.iter().map(|c| c.is_current).collect();
        assert_eq!(flags, vec![false, false, true, false, false]);
    }

    #[test]
    fn test_window_cell_labels() {
        let current = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(); // Saturday
        let window = navigation_window(current);
        assert_eq!(window[2].day_name, "Sat");
        assert_eq!(window[2].day_num, "15");
        assert_eq!(window[0].day_name, "Thu");
        assert_eq!(window[0].day_num, "13");
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let current = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let window = navigation_window(current);
        assert_eq!(window[0].date, NaiveDate::from_ymd_opt(2024, 6, 29).unwrap());
        assert_eq!(window[4].date, NaiveDate::from_ymd_opt(2024, 7, 3).unwrap());
    }
}
