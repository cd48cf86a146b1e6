use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;

use crate::features::uploads::handlers::{list_files, show_upload_form, upload_file};
use crate::features::uploads::services::UploadService;

/// Create routes for the uploads feature
///
/// `max_body_size` caps the upload request body; larger bodies are rejected
/// with 413 before anything reaches the store.
pub fn routes(upload_service: Arc<UploadService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/",
            get(show_upload_form)
                .post(upload_file)
                .layer(DefaultBodyLimit::max(max_body_size)),
        )
        .route("/files", get(list_files))
        .with_state(upload_service)
}
