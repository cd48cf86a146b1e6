use axum::{
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::StatusCode,
};
use tracing::debug;

use crate::core::error::AppError;
use crate::features::uploads::dtos::UploadedFile;
use crate::shared::constants::{DEFAULT_CONTENT_TYPE, FILE_FIELD_NAME};

/// Upload form extractor.
///
/// Yields `file: None` when the request carries no usable file part: the
/// body is not multipart, there is no `file` field, or the field's filename
/// is empty (what browsers send when nothing was picked).
pub struct UploadForm {
    pub file: Option<UploadedFile>,
}

impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = match Multipart::from_request(req, state).await {
            Ok(multipart) => multipart,
            Err(rejection) => {
                debug!("Upload request is not multipart: {}", rejection);
                return Ok(Self { file: None });
            }
        };

        let mut file = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let field_name = field.name().unwrap_or("").to_string();
            if field_name != FILE_FIELD_NAME || file.is_some() {
                debug!("Ignoring field: {}", field_name);
                continue;
            }

            let file_name = match field.file_name() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => {
                    debug!("File field without a filename, treating as no file");
                    continue;
                }
            };

            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

            let data = field.bytes().await.map_err(multipart_error)?;

            file = Some(UploadedFile {
                file_name,
                content_type,
                data: data.to_vec(),
            });
        }

        Ok(Self { file })
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    debug!("Failed to read multipart data: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(format!("Failed to read multipart data: {}", e.body_text()))
    }
}
