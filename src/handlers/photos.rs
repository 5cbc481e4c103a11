use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    response::Redirect,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::handlers::resolve_date;
use crate::models::diary::GalleryImage;
use crate::storage::UploadStore;
use crate::AppState;

/// Direct photo upload without a full entry save. The date's entry is
/// created empty first when absent, to have an id to attach to.
pub async fn upload_photos(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    let mut date_raw: Option<String> = None;
    let mut files: Vec<(String, Bytes)> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("date") => date_raw = Some(field.text().await?),
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

    let date = resolve_date(date_raw.as_deref());
    let entry = state.store.get_or_create_diary_entry(date).await?;

    let mut count = 0;
    for (filename, data) in &files {
        if UploadStore::is_allowed(filename) {
            let stored = state.uploads.store(date, filename, data).await?;
            state.store.create_diary_image(entry.id, &stored).await?;
            count += 1;
        }
    }

    Ok(Json(json!({ "success": true, "count": count })))
}

/// Delete an image: the on-disk file first (failure tolerated), then
/// the row. Redirects to the owning entry's diary page.
pub async fn delete_photo(
    State(state): State<AppState>,
    Path(image_id): Path<i64>,
) -> AppResult<Redirect> {
    let image = state
        .store
        .get_diary_image(image_id)
        .await?
        .ok_or(AppError::NotFound("Image not found".into()))?;

    let entry_date = state
        .store
        .get_diary_entry(image.diary_entry_id)
        .await?
        .map(|entry| entry.date)
        .unwrap_or_else(|| Utc::now().date_naive());

    state.uploads.remove(&image.image_path).await;
    state.store.delete_diary_image(image.id).await?;

    Ok(Redirect::to(&format!("/diary?date={entry_date}")))
}

/// All images joined with their entry date, newest entry date first.
pub async fn gallery(State(state): State<AppState>) -> AppResult<Json<Vec<GalleryImage>>> {
    let images = state.store.gallery_images().await?;
    Ok(Json(images))
}
