use axum::{extract::State, response::Html};
use minijinja::Value;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::uploads::services::UploadService;
use crate::shared::templates::render_page;

/// List uploaded files
///
/// A failing store still renders the page, with no entries and an error
/// notice.
pub async fn list_files(State(service): State<Arc<UploadService>>) -> Result<Html<String>> {
    let view = service.list().await;
    let html = render_page("files.html", Value::from_serialize(&view))?;
    Ok(Html(html))
}
