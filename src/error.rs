use folio_layout::LayoutError;
use folio_render_core::RenderError;
use folio_template::TemplateError;
use folio_types::Diagnostic;
use thiserror::Error;

/// Everything that can stop a document from being produced.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Strict mode turns any warning into a failure. The diagnostics that
    /// triggered it are carried along.
    #[error("{} warning(s) reported in strict mode", .diagnostics.len())]
    Strict { diagnostics: Vec<Diagnostic> },
}
