use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid template: {0}")]
    Invalid(String),
}
