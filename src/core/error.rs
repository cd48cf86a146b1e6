use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::shared::templates::{render_page, TemplateError};

/// Errors that abort a request.
///
/// Store failures are not represented here: they are reported on the page
/// itself as part of the handler's result.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(ref msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::Template(ref e) => {
                tracing::error!("Template error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let ctx = minijinja::context! {
            status => status.as_u16(),
            message => message.clone(),
        };

        match render_page("error.html", ctx) {
            Ok(body) => (status, Html(body)).into_response(),
            // The error page itself failed; fall back to plain text
            Err(_) => (status, message).into_response(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_keeps_message() {
        let response = AppError::BadRequest("Malformed form data".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_payload_too_large_status() {
        let response = AppError::PayloadTooLarge("length limit exceeded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_template_error_is_internal() {
        let response =
            AppError::Template(TemplateError::NotFound("x.html".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
