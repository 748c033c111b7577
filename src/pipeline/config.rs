use folio_layout::{AnchorOptions, LayoutConfig};
use folio_resource::ResourceConfig;
use folio_types::{Diagnostic, Severity};
use serde::{Deserialize, Serialize};

/// Settings fixed when the pipeline is built.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub layout: LayoutConfig,
    pub resources: ResourceConfig,
    pub anchors: AnchorOptions,
    /// Fail every render that reports a warning.
    pub strict: bool,
}

/// Per-call settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Fail this render if it reports a warning, in addition to the
    /// pipeline-wide setting.
    pub strict: bool,
    /// Flate-compress page content streams.
    pub compress: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            strict: false,
            compress: true,
        }
    }
}

impl RenderOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutput {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl RenderOutput {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning | Severity::Error))
    }
}
