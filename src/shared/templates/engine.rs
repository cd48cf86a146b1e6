//! Template engine for HTML pages using Jinja2 syntax.
//!
//! Templates live in `templates/pages/` and are embedded at compile time, so
//! the binary does not depend on its working directory.

use minijinja::{Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Embedded page templates as (name, source)
const PAGES: &[(&str, &str)] = &[
    (
        "base.html",
        include_str!("../../../templates/pages/base.html"),
    ),
    (
        "upload.html",
        include_str!("../../../templates/pages/upload.html"),
    ),
    (
        "files.html",
        include_str!("../../../templates/pages/files.html"),
    ),
    (
        "error.html",
        include_str!("../../../templates/pages/error.html"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Build the environment from the embedded pages.
///
/// `.html` templates are auto-escaped by minijinja's default callback.
fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for (name, source) in PAGES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a page template with the given context.
///
/// # Example
/// ```ignore
/// let html = render_page("upload.html", minijinja::context! { url => None::<String> })?;
/// ```
pub fn render_page(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Check if a template exists
#[cfg(test)]
fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_pages_load() {
        for (name, _) in PAGES {
            assert!(template_exists(name), "missing template {}", name);
        }
        assert!(!template_exists("definitely_not_a_real_template.html"));
    }

    #[test]
    fn test_render_missing_template() {
        let result = render_page("nonexistent.html", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_html_is_escaped() {
        let html = render_page(
            "error.html",
            context! { status => 400, message => "<script>alert(1)</script>" },
        )
        .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
