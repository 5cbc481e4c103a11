use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A dated short message. `is_completed` is part of the entity but
/// unused by any current view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reminder {
    pub id: i64,
    pub date: NaiveDate,
    pub message: String,
    pub is_completed: bool,
}
