use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::handlers::resolve_date;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub date: Option<String>,
}

/// Flip completion for one routine item on one date. An existing log
/// inverts its status; a missing one is created completed. The
/// lookup-then-write pair is deliberately not a transaction: concurrent
/// toggles of the same (date, item) are last-writer-wins.
pub async fn toggle_routine(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    body: Option<Json<ToggleRequest>>,
) -> AppResult<Json<Value>> {
    state
        .store
        .get_routine(item_id)
        .await?
        .ok_or(AppError::NotFound("Routine item not found".into()))?;

    let date = resolve_date(body.as_ref().and_then(|b| b.date.as_deref()));

    let status = match state.store.tracker_log_for(date, item_id).await? {
        Some(log) => {
            let flipped = !log.status;
            state.store.set_tracker_status(log.id, flipped).await?;
            flipped
        }
        None => {
            state.store.create_tracker_log(date, item_id, true).await?;
            true
        }
    };

    Ok(Json(json!({ "success": true, "status": status })))
}
