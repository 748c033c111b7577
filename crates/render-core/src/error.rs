use folio_layout::MeasureError;
use folio_resource::ResourceError;
use folio_types::DiagnosticKind;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
    #[error("Invalid properties: {0}")]
    InvalidProperties(String),
    #[error("Unknown element type '{0}'")]
    UnknownElement(String),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Surface error: {0}")]
    Surface(String),
}

impl RenderError {
    /// Errors of the output backend abort the render; everything else is
    /// reported against the element and drawn as a placeholder.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::Pdf(_) | RenderError::Io(_) | RenderError::Surface(_))
    }

    pub fn diagnostic_kind(&self) -> DiagnosticKind {
        match self {
            RenderError::Resource(_) => DiagnosticKind::Resource,
            RenderError::InvalidProperties(_) | RenderError::UnknownElement(_) => {
                DiagnosticKind::Validation
            }
            RenderError::Pdf(_) | RenderError::Io(_) | RenderError::Surface(_) => {
                DiagnosticKind::Contract
            }
        }
    }
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

impl From<RenderError> for MeasureError {
    fn from(err: RenderError) -> Self {
        MeasureError::new(err.diagnostic_kind(), err.to_string())
    }
}

/// A structural problem in an element's properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub property: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
        }
    }

    pub fn missing(property: &str) -> Self {
        Self::new(property, "is required")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' {}", self.property, self.message)
    }
}
