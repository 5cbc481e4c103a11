use axum::{extract::State, response::Redirect, Form};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddReminderForm {
    pub date: Option<String>,
    pub message: Option<String>,
}

/// Create a dated reminder. A missing message, or a missing or
/// malformed date, skips the write — a reminder silently moved to
/// today would say the wrong thing.
pub async fn add_reminder(
    State(state): State<AppState>,
    Form(form): Form<AddReminderForm>,
) -> AppResult<Redirect> {
    let date = form
        .date
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
    let message = form.message.filter(|m| !m.is_empty());

    if let (Some(date), Some(message)) = (date, message) {
        state.store.create_reminder(date, &message).await?;
        return Ok(Redirect::to(&format!("/?date={date}")));
    }

    Ok(Redirect::to("/"))
}
