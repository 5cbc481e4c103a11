//! Read-only chart aggregates: most-completed routines, recent diary
//! activity, and category distribution. Parallel label/data arrays per
//! chart.

use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::routine::RoutineItem;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyticsView {
    pub routines_labels: Vec<String>,
    pub routines_data: Vec<i64>,
    pub diary_labels: Vec<String>,
    pub diary_data: Vec<i64>,
    pub category_labels: Vec<String>,
    pub category_data: Vec<i64>,
}

pub async fn analytics(State(state): State<AppState>) -> AppResult<Json<AnalyticsView>> {
    // Top-10 most-completed routine names over all history.
    let top = state.store.completed_counts_by_name(10).await?;
    let (routines_labels, routines_data): (Vec<String>, Vec<i64>) = top.into_iter().unzip();

    // Last 7 calendar days of diary activity, 1 when the day's entry
    // has non-empty content.
    let today = Utc::now().date_naive();
    let mut diary_labels = Vec::with_capacity(7);
    let mut diary_data = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let day = today - Duration::days(offset);
        let entry = state.store.diary_entry_for_date(day).await?;
        let active = entry
            .and_then(|e| e.content)
            .map_or(false, |c| !c.is_empty());
        diary_labels.push(day.format("%a").to_string());
        diary_data.push(if active { 1 } else { 0 });
    }

    let items = state.store.all_routines().await?;
    let (category_labels, category_data) = category_distribution(&items);

    Ok(Json(AnalyticsView {
        routines_labels,
        routines_data,
        diary_labels,
        diary_data,
        category_labels,
        category_data,
    }))
}

/// Item counts per category in first-seen id order; items without a
/// category group under "Uncategorized".
fn category_distribution(items: &[RoutineItem]) -> (Vec<String>, Vec<i64>) {
    let mut labels: Vec<String> = Vec::new();
    let mut data: Vec<i64> = Vec::new();
    for item in items {
        let category = item.category.as_deref().unwrap_or("Uncategorized");
        match labels.iter().position(|l| l == category) {
            Some(i) => data[i] += 1,
            None => {
                labels.push(category.to_string());
                data.push(1);
            }
        }
    }
    (labels, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::routine::RoutineKind;

    fn item(id: i64, category: Option<&str>) -> RoutineItem {
        RoutineItem {
            id,
            name: format!("item-{id}"),
            time_start: "06:00 AM".into(),
            time_end: None,
            routine_type: RoutineKind::Weekday,
            category: category.map(str::to_owned),
            description: None,
        }
    }

    #[test]
    fn test_category_distribution_first_seen_order() {
        let items = vec![
            item(1, Some("Health")),
            item(2, None),
            item(3, Some("Work")),
            item(4, Some("Health")),
            item(5, None),
        ];
        let (labels, data) = category_distribution(&items);
        assert_eq!(labels, vec!["Health", "Uncategorized", "Work"]);
        assert_eq!(data, vec![2, 2, 1]);
    }

    #[test]
    fn test_category_distribution_empty() {
        let (labels, data) = category_distribution(&[]);
        assert!(labels.is_empty());
        assert!(data.is_empty());
    }
}
