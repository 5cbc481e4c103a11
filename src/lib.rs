pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod storage;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use config::Config;
use db::Store;
use storage::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub uploads: UploadStore,
    pub config: Arc<Config>,
}

/// Build the full application router. Kept out of `main` so tests can
/// drive it directly.
pub fn app(state: AppState) -> Router {
    let upload_dir = state.config.upload_dir.clone();

    Router::new()
        .route("/", get(handlers::dashboard::dashboard))
        .route("/toggle_habit/:id", post(handlers::tracker::toggle_routine))
        .route(
            "/settings",
            get(handlers::routines::list_settings).post(handlers::routines::update_target_score),
        )
        .route("/settings/add", post(handlers::routines::add_routine))
        .route(
            "/settings/delete/:id",
            post(handlers::routines::delete_routine),
        )
        .route("/reminders/add", post(handlers::reminders::add_reminder))
        .route(
            "/diary",
            get(handlers::diary::view_entry).post(handlers::diary::upsert_entry),
        )
        .route("/diary/save", post(handlers::diary::autosave))
        .route("/photo/upload", post(handlers::photos::upload_photos))
        .route("/photo/delete/:id", post(handlers::photos::delete_photo))
        .route("/timetable", get(handlers::routines::timetable))
        .route("/gallery", get(handlers::photos::gallery))
        .route("/timeline", get(handlers::diary::timeline))
        .route("/analytics", get(handlers::analytics::analytics))
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(16 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
