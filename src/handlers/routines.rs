//! Settings management: routine item CRUD, the target-score setting,
//! and the weekday/weekend timetable.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::routine::{CreateRoutineRequest, RoutineItem, RoutineKind};
use crate::models::setting::TARGET_SCORE_KEY;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub items: Vec<RoutineItem>,
    pub target_score: String,
}

/// All routine items sorted by (type, parsed start time), with the same
/// midnight fallback for unparsable times as the dashboard.
pub async fn list_settings(State(state): State<AppState>) -> AppResult<Json<SettingsView>> {
    let mut items = state.store.all_routines().await?;
    items.sort_by_key(|item| (item.routine_type, item.parsed_time_start()));

    let target_score = state
        .store
        .setting(TARGET_SCORE_KEY)
        .await?
        .unwrap_or_else(|| "80".into());

    Ok(Json(SettingsView {
        items,
        target_score,
    }))
}

#[derive(Debug, Deserialize)]
pub struct TargetScoreForm {
    pub target_score: Option<String>,
}

pub async fn update_target_score(
    State(state): State<AppState>,
    Form(form): Form<TargetScoreForm>,
) -> AppResult<Redirect> {
    if let Some(value) = form.target_score.filter(|v| !v.is_empty()) {
        state.store.upsert_setting(TARGET_SCORE_KEY, &value).await?;
    }
    Ok(Redirect::to("/settings"))
}

#[derive(Debug, Deserialize)]
pub struct AddRoutineForm {
    pub name: Option<String>,
    pub time_start: Option<String>,
    pub routine_type: Option<String>,
    pub time_end: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Missing required fields or an unknown routine type skip the write;
/// the redirect happens either way.
pub async fn add_routine(
    State(state): State<AppState>,
    Form(form): Form<AddRoutineForm>,
) -> AppResult<Redirect> {
    let name = form.name.filter(|v| !v.is_empty());
    let time_start = form.time_start.filter(|v| !v.is_empty());
    let kind = form
        .routine_type
        .as_deref()
        .and_then(|v| v.parse::<RoutineKind>().ok());

    if let (Some(name), Some(time_start), Some(routine_type)) = (name, time_start, kind) {
        state
            .store
            .create_routine(CreateRoutineRequest {
                name,
                time_start,
                routine_type,
                time_end: form.time_end.filter(|v| !v.is_empty()),
                category: form.category.filter(|v| !v.is_empty()),
                description: form.description.filter(|v| !v.is_empty()),
            })
            .await?;
    }

    Ok(Redirect::to("/settings"))
}

pub async fn delete_routine(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> AppResult<Redirect> {
    let deleted = state.store.delete_routine(item_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Routine item not found".into()));
    }
    Ok(Redirect::to("/settings"))
}

#[derive(Debug, Serialize)]
pub struct TimetableView {
    pub weekday: Vec<RoutineItem>,
    pub weekend: Vec<RoutineItem>,
}

pub async fn timetable(State(state): State<AppState>) -> AppResult<Json<TimetableView>> {
    let weekday = state.store.routines_for_kind(RoutineKind::Weekday).await?;
    let weekend = state.store.routines_for_kind(RoutineKind::Weekend).await?;
    Ok(Json(TimetableView { weekday, weekend }))
}
