//! Storage service: one query method per access pattern over the five
//! entities. Handlers go through this object instead of touching the
//! pool directly; relationships are explicit foreign-key queries.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::diary::{DiaryEntry, DiaryImage, GalleryImage};
use crate::models::reminder::Reminder;
use crate::models::routine::{CreateRoutineRequest, RoutineItem, RoutineKind};
use crate::models::tracker::TrackerLog;

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ── Routine items ────────────────────────────────────────────────

    pub async fn create_routine(&self, req: CreateRoutineRequest) -> sqlx::Result<RoutineItem> {
        let item = sqlx::query_as::<_, RoutineItem>(
            r#"
            INSERT INTO routine_items (name, time_start, time_end, routine_type, category, description)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.time_start)
        .bind(&req.time_end)
        .bind(req.routine_type)
        .bind(&req.category)
        .bind(&req.description)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = item.id, name = %item.name, "Created routine item");
        Ok(item)
    }

    pub async fn get_routine(&self, id: i64) -> sqlx::Result<Option<RoutineItem>> {
        sqlx::query_as::<_, RoutineItem>("SELECT * FROM routine_items WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn all_routines(&self) -> sqlx::Result<Vec<RoutineItem>> {
        sqlx::query_as::<_, RoutineItem>("SELECT * FROM routine_items ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn routines_for_kind(&self, kind: RoutineKind) -> sqlx::Result<Vec<RoutineItem>> {
        sqlx::query_as::<_, RoutineItem>(
            "SELECT * FROM routine_items WHERE routine_type = ? ORDER BY id ASC",
        )
        .bind(kind)
        .fetch_all(&self.pool)
        .await
    }

    /// Returns the number of rows deleted (0 when the id is unknown).
    /// Foreign keys cascade, so the item's logs go with it.
    pub async fn delete_routine(&self, id: i64) -> sqlx::Result<u64> {
        let result = sqlx::query("DELETE FROM routine_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn clear_routines(&self) -> sqlx::Result<u64> {
        let result = sqlx::query("DELETE FROM routine_items")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn routine_count(&self) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM routine_items")
            .fetch_one(&self.pool)
            .await
    }

    // ── Tracker logs ─────────────────────────────────────────────────

    pub async fn tracker_logs_for_date(&self, date: NaiveDate) -> sqlx::Result<Vec<TrackerLog>> {
        sqlx::query_as::<_, TrackerLog>("SELECT * FROM tracker_logs WHERE date = ?")
            .bind(date)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn tracker_log_for(
        &self,
        date: NaiveDate,
        routine_item_id: i64,
    ) -> sqlx::Result<Option<TrackerLog>> {
        sqlx::query_as::<_, TrackerLog>(
            "SELECT * FROM tracker_logs WHERE date = ? AND routine_item_id = ?",
        )
        .bind(date)
        .bind(routine_item_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn tracker_logs_for_item(&self, routine_item_id: i64) -> sqlx::Result<Vec<TrackerLog>> {
        sqlx::query_as::<_, TrackerLog>(
            "SELECT * FROM tracker_logs WHERE routine_item_id = ? ORDER BY date ASC",
        )
        .bind(routine_item_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn create_tracker_log(
        &self,
        date: NaiveDate,
        routine_item_id: i64,
        status: bool,
    ) -> sqlx::Result<TrackerLog> {
        let log = sqlx::query_as::<_, TrackerLog>(
            r#"
            INSERT INTO tracker_logs (date, routine_item_id, status)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(date)
        .bind(routine_item_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = log.id, %date, routine_item_id, "Created tracker log");
        Ok(log)
    }

    pub async fn set_tracker_status(&self, id: i64, status: bool) -> sqlx::Result<()> {
        sqlx::query("UPDATE tracker_logs SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Completed-log counts per routine name across all history,
    /// highest first, ties broken by name.
    pub async fn completed_counts_by_name(&self, limit: i64) -> sqlx::Result<Vec<(String, i64)>> {
        sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT r.name, COUNT(*) AS completed
            FROM tracker_logs t
            JOIN routine_items r ON r.id = t.routine_item_id
            WHERE t.status = 1
            GROUP BY r.name
            ORDER BY completed DESC, r.name ASC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    // ── Diary entries & images ───────────────────────────────────────

    pub async fn diary_entry_for_date(&self, date: NaiveDate) -> sqlx::Result<Option<DiaryEntry>> {
        sqlx::query_as::<_, DiaryEntry>("SELECT * FROM diary_entries WHERE date = ?")
            .bind(date)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_diary_entry(&self, id: i64) -> sqlx::Result<Option<DiaryEntry>> {
        sqlx::query_as::<_, DiaryEntry>("SELECT * FROM diary_entries WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create_diary_entry(
        &self,
        date: NaiveDate,
        content: Option<&str>,
        pinned_text: Option<&str>,
    ) -> sqlx::Result<DiaryEntry> {
        let entry = sqlx::query_as::<_, DiaryEntry>(
            r#"
            INSERT INTO diary_entries (date, content, pinned_text)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(date)
        .bind(content)
        .bind(pinned_text)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = entry.id, %date, "Created diary entry");
        Ok(entry)
    }

    pub async fn update_diary_entry(
        &self,
        id: i64,
        content: Option<&str>,
        pinned_text: Option<&str>,
    ) -> sqlx::Result<()> {
        sqlx::query("UPDATE diary_entries SET content = ?, pinned_text = ? WHERE id = ?")
            .bind(content)
            .bind(pinned_text)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// The date's entry, created with the given text when absent,
    /// updated in place when present. Keeps the one-entry-per-date
    /// invariant on the write path.
    pub async fn upsert_diary_entry(
        &self,
        date: NaiveDate,
        content: Option<&str>,
        pinned_text: Option<&str>,
    ) -> sqlx::Result<DiaryEntry> {
        match self.diary_entry_for_date(date).await? {
            Some(entry) => {
                self.update_diary_entry(entry.id, content, pinned_text)
                    .await?;
                Ok(DiaryEntry {
                    content: content.map(str::to_owned),
                    pinned_text: pinned_text.map(str::to_owned),
                    ..entry
                })
            }
            None => self.create_diary_entry(date, content, pinned_text).await,
        }
    }

    /// The date's entry, created empty when absent. Used by photo upload,
    /// which needs an entry id without touching existing text.
    pub async fn get_or_create_diary_entry(&self, date: NaiveDate) -> sqlx::Result<DiaryEntry> {
        match self.diary_entry_for_date(date).await? {
            Some(entry) => Ok(entry),
            None => self.create_diary_entry(date, Some(""), Some("")).await,
        }
    }

    pub async fn all_diary_entries_desc(&self) -> sqlx::Result<Vec<DiaryEntry>> {
        sqlx::query_as::<_, DiaryEntry>("SELECT * FROM diary_entries ORDER BY date DESC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn images_for_entry(&self, diary_entry_id: i64) -> sqlx::Result<Vec<DiaryImage>> {
        sqlx::query_as::<_, DiaryImage>(
            "SELECT * FROM diary_images WHERE diary_entry_id = ? ORDER BY id ASC",
        )
        .bind(diary_entry_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_diary_image(&self, id: i64) -> sqlx::Result<Option<DiaryImage>> {
        sqlx::query_as::<_, DiaryImage>("SELECT * FROM diary_images WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create_diary_image(
        &self,
        diary_entry_id: i64,
        image_path: &str,
    ) -> sqlx::Result<DiaryImage> {
        let image = sqlx::query_as::<_, DiaryImage>(
            r#"
            INSERT INTO diary_images (diary_entry_id, image_path)
            VALUES (?, ?)
            RETURNING *
            "#,
        )
        .bind(diary_entry_id)
        .bind(image_path)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = image.id, diary_entry_id, path = %image.image_path, "Recorded diary image");
        Ok(image)
    }

    pub async fn delete_diary_image(&self, id: i64) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM diary_images WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn gallery_images(&self) -> sqlx::Result<Vec<GalleryImage>> {
        sqlx::query_as::<_, GalleryImage>(
            r#"
            SELECT i.id, i.image_path, d.date
            FROM diary_images i
            JOIN diary_entries d ON d.id = i.diary_entry_id
            ORDER BY d.date DESC, i.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    // ── Reminders ────────────────────────────────────────────────────

    pub async fn reminders_for_date(&self, date: NaiveDate) -> sqlx::Result<Vec<Reminder>> {
        sqlx::query_as::<_, Reminder>("SELECT * FROM reminders WHERE date = ? ORDER BY id ASC")
            .bind(date)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn create_reminder(&self, date: NaiveDate, message: &str) -> sqlx::Result<Reminder> {
        let reminder = sqlx::query_as::<_, Reminder>(
            r#"
            INSERT INTO reminders (date, message)
            VALUES (?, ?)
            RETURNING *
            "#,
        )
        .bind(date)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = reminder.id, %date, "Created reminder");
        Ok(reminder)
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub async fn setting(&self, key: &str) -> sqlx::Result<Option<String>> {
        let value = sqlx::query_scalar::<_, Option<String>>(
            "SELECT value FROM user_settings WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value.flatten())
    }

    pub async fn upsert_setting(&self, key: &str, value: &str) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_settings (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
