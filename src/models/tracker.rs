use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Whether one routine item was completed on one calendar date.
/// At most one row per (date, routine_item_id), enforced by the
/// toggle's lookup-then-flip-or-create path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrackerLog {
    pub id: i64,
    pub date: NaiveDate,
    pub routine_item_id: i64,
    pub status: bool,
}
