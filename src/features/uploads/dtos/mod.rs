mod upload_dto;

pub use upload_dto::{format_last_modified, ListedFileDto, ListingView, UploadOutcome, UploadedFile};
