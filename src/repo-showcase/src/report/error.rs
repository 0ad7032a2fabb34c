//! Report rendering error types.

use thiserror::Error;

/// Errors that can occur while rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to read a custom template.
    #[error("Failed to read template '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Template failed to compile.
    #[error("Template compile error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// Template failed to render.
    #[error("Template render error: {0}")]
    Render(#[from] handlebars::RenderError),
}
