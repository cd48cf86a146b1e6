mod listing_handler;
mod upload_handler;

pub use listing_handler::list_files;
pub use upload_handler::{show_upload_form, upload_file};
