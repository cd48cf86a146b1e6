/// Multipart field carrying the uploaded file
pub const FILE_FIELD_NAME: &str = "file";

/// Content type stored when the client did not declare one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Notice shown when the form was submitted without a file
pub const NO_FILE_SELECTED: &str = "No file selected";

/// Length of the random hex token prefixed to every key (128 bits)
pub const KEY_TOKEN_HEX_LEN: usize = 32;
