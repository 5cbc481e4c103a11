//! Diary entry views and writes: the full multipart form, the
//! urlencoded autosave, and the year/month timeline.

use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    response::Redirect,
    Form, Json,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::handlers::resolve_date;
use crate::models::diary::DiaryEntry;
use crate::storage::UploadStore;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DiaryQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DiaryView {
    pub date: NaiveDate,
    pub entry: Option<DiaryEntryView>,
}

#[derive(Debug, Serialize)]
pub struct DiaryEntryView {
    #[serde(flatten)]
    pub entry: DiaryEntry,
    pub images: Vec<String>,
}

pub async fn view_entry(
    State(state): State<AppState>,
    Query(query): Query<DiaryQuery>,
) -> AppResult<Json<DiaryView>> {
    let date = resolve_date(query.date.as_deref());

    let entry = match state.store.diary_entry_for_date(date).await? {
        Some(entry) => {
            let images = state
                .store
                .images_for_entry(entry.id)
                .await?
                .into_iter()
                .map(|img| img.image_path)
                .collect();
            Some(DiaryEntryView { entry, images })
        }
        None => None,
    };

    Ok(Json(DiaryView { date, entry }))
}

/// Full diary form: upsert the date's entry, then store any accepted
/// photos against it. Files failing the allow-list are skipped silently.
pub async fn upsert_entry(
    State(state): State<AppState>,
    Query(query): Query<DiaryQuery>,
    mut multipart: Multipart,
) -> AppResult<Redirect> {
    let date = resolve_date(query.date.as_deref());

    let mut content: Option<String> = None;
    let mut pinned_text: Option<String> = None;
    let mut files: Vec<(String, Bytes)> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("content") => content = Some(field.text().await?),
            Some("pinned_text") => pinned_text = Some(field.text().await?),
            Some("photos") => {
                let Some(filename) = field.file_name().map(str::to_owned) else {
                    continue;
                };
                if filename.is_empty() {
                    continue;
                }
                files.push((filename, field.bytes().await?));
            }
            _ => {}
        }
    }

    let entry = state
        .store
        .upsert_diary_entry(date, content.as_deref(), pinned_text.as_deref())
        .await?;

    for (filename, data) in &files {
        if UploadStore::is_allowed(filename) {
            let stored = state.uploads.store(date, filename, data).await?;
            state.store.create_diary_image(entry.id, &stored).await?;
        }
    }

    Ok(Redirect::to(&format!("/diary?date={date}")))
}

#[derive(Debug, Deserialize)]
pub struct AutosaveForm {
    pub date: Option<String>,
    pub content: Option<String>,
    pub pinned_text: Option<String>,
}

/// Autosave without a page reload; missing text fields write as empty.
pub async fn autosave(
    State(state): State<AppState>,
    Form(form): Form<AutosaveForm>,
) -> AppResult<Json<Value>> {
    let date = resolve_date(form.date.as_deref());
    let content = form.content.unwrap_or_default();
    let pinned_text = form.pinned_text.unwrap_or_default();

    state
        .store
        .upsert_diary_entry(date, Some(&content), Some(&pinned_text))
        .await?;

    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Serialize)]
pub struct TimelineYear {
    pub year: i32,
    pub months: Vec<TimelineMonth>,
}

#[derive(Debug, Serialize)]
pub struct TimelineMonth {
    pub month: String,
    pub entries: Vec<DiaryEntry>,
}

/// All entries grouped year → month name, both newest-first.
pub async fn timeline(State(state): State<AppState>) -> AppResult<Json<Vec<TimelineYear>>> {
    let entries = state.store.all_diary_entries_desc().await?;
    Ok(Json(group_by_year_month(entries)))
}

fn group_by_year_month(entries: Vec<DiaryEntry>) -> Vec<TimelineYear> {
    let mut years: Vec<TimelineYear> = Vec::new();
    for entry in entries {
        let year = entry.date.year();
        let month = entry.date.format("%B").to_string();

        if years.last().map(|y| y.year) != Some(year) {
            years.push(TimelineYear {
                year,
                months: Vec::new(),
            });
        }
        if let Some(y) = years.last_mut() {
            if y.months.last().map(|m| m.month.as_str()) != Some(month.as_str()) {
                y.months.push(TimelineMonth {
                    month,
                    entries: Vec::new(),
                });
            }
            if let Some(m) = y.months.last_mut() {
                m.entries.push(entry);
            }
        }
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, date: &str) -> DiaryEntry {
        DiaryEntry {
            id,
            date: date.parse().unwrap(),
            content: Some("text".into()),
            pinned_text: None,
            mood: None,
        }
    }

    #[test]
    fn test_timeline_groups_by_year_then_month() {
        let grouped = group_by_year_month(vec![
            entry(4, "2024-06-15"),
            entry(3, "2024-06-01"),
            entry(2, "2024-05-20"),
            entry(1, "2023-12-31"),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].year, 2024);
        assert_eq!(grouped[0].months.len(), 2);
        assert_eq!(grouped[0].months[0].month, "June");
        assert_eq!(grouped[0].months[0].entries.len(), 2);
        assert_eq!(grouped[0].months[1].month, "May");
        assert_eq!(grouped[1].year, 2023);
        assert_eq!(grouped[1].months[0].month, "December");
    }

    #[test]
    fn test_timeline_empty() {
        assert!(group_by_year_month(Vec::new()).is_empty());
    }
}
