use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Free-text journal content for one calendar date. At most one row per
/// date (write-path invariant). `mood` is part of the entity but written
/// by no current route.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiaryEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub content: Option<String>,
    pub pinned_text: Option<String>,
    pub mood: Option<String>,
}

/// An uploaded image attached to a diary entry. `image_path` is the
/// stored filename only, never an absolute path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiaryImage {
    pub id: i64,
    pub diary_entry_id: i64,
    pub image_path: String,
}

/// Gallery row: an image joined with its entry's date.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GalleryImage {
    pub id: i64,
    pub image_path: String,
    pub date: NaiveDate,
}
