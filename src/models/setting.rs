use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Generic key/value pair; currently only `target_score`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSetting {
    pub id: i64,
    pub key: String,
    pub value: Option<String>,
}

/// Key under which the completion-percentage goal is stored.
pub const TARGET_SCORE_KEY: &str = "target_score";

/// Displayed when the setting is unset or unparsable.
pub const DEFAULT_TARGET_SCORE: i64 = 80;
