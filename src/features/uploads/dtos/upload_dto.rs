use axum::http::StatusCode;
use chrono::DateTime;
use serde::Serialize;

use crate::shared::constants::NO_FILE_SELECTED;

/// File part read from the upload form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename, never empty
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-off message shown on the page rendered for the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Result of handling one upload submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded { key: String, url: String },
    NoFileSelected,
    Failed { message: String },
}

impl UploadOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadOutcome::Uploaded { .. } => StatusCode::CREATED,
            UploadOutcome::NoFileSelected => StatusCode::BAD_REQUEST,
            UploadOutcome::Failed { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            UploadOutcome::Uploaded { url, .. } => Some(url),
            _ => None,
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            UploadOutcome::Uploaded { .. } => Notice::success("File uploaded"),
            UploadOutcome::NoFileSelected => Notice::error(NO_FILE_SELECTED),
            UploadOutcome::Failed { message } => Notice::error(message.clone()),
        }
    }
}

/// Listing entry as rendered on the files page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedFileDto {
    pub key: String,
    pub display_name: String,
    pub url: String,
    pub size: u64,
    pub last_modified: Option<String>,
}

/// Everything the files page needs for one request
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListingView {
    pub container: String,
    pub files: Vec<ListedFileDto>,
    /// Set when the store could not be listed; `files` is then empty
    pub error: Option<String>,
}

/// Render a store timestamp as `YYYY-MM-DD HH:MM UTC`, keeping unparsable
/// values as they came
pub fn format_last_modified(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts
            .with_timezone(&chrono::Utc)
            .format("%Y-%m-%d %H:%M UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}
