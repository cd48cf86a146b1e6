//! HTML page rendering

mod engine;

pub use engine::{render_page, TemplateError};
