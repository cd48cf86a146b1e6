use axum::{extract::State, http::StatusCode, response::Html};
use minijinja::context;
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::UploadForm;
use crate::features::uploads::services::UploadService;
use crate::shared::templates::render_page;

/// Render the empty upload form
pub async fn show_upload_form() -> Result<Html<String>> {
    let html = render_page("upload.html", context! {})?;
    Ok(Html(html))
}

/// Upload a file
///
/// Accepts multipart/form-data with a `file` field. The form is rendered
/// again with either the public URL of the stored object or a notice
/// explaining why nothing was stored.
pub async fn upload_file(
    State(service): State<Arc<UploadService>>,
    form: UploadForm,
) -> Result<(StatusCode, Html<String>)> {
    let outcome = service.upload(form.file).await;

    let html = render_page(
        "upload.html",
        context! {
            url => outcome.url(),
            notice => outcome.notice(),
        },
    )?;

    Ok((outcome.status(), Html(html)))
}
