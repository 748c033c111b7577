#![allow(dead_code)]

pub mod fixtures;

use folio::{PipelineBuilder, PipelineError, RenderOptions, RenderOutput};
use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};
use serde_json::Value;
use std::path::Path;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub output: RenderOutput,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_output(output: RenderOutput) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&output.bytes)?;
        Ok(Self { output, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Strings shown with `Tj` on a 1-based page, in content order.
    pub fn page_texts(&self, page_number: u32) -> Vec<String> {
        let pages = self.doc.get_pages();
        let Some(page_id) = pages.get(&page_number) else {
            return Vec::new();
        };
        let Ok(bytes) = self.doc.get_page_content(*page_id) else {
            return Vec::new();
        };
        let Ok(content) = Content::decode(&bytes) else {
            return Vec::new();
        };
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.iter().map(|&b| b as char).collect()),
                _ => None,
            })
            .collect()
    }

    /// All page text joined with newlines, one line per shown string.
    pub fn text(&self) -> String {
        (1..=self.page_count() as u32)
            .flat_map(|page| self.page_texts(page))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn page_contains(&self, page_number: u32, needle: &str) -> bool {
        self.page_texts(page_number).iter().any(|t| t.contains(needle))
    }

    /// Number of image XObjects in the file, soft masks excluded.
    pub fn image_count(&self) -> usize {
        self.doc
            .objects
            .values()
            .filter(|object| match object {
                Object::Stream(stream) => {
                    stream.dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(b"Image".as_slice())
                        && stream.dict.get(b"ColorSpace").and_then(Object::as_name).ok()
                            != Some(b"DeviceGray".as_slice())
                }
                _ => false,
            })
            .count()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.output.bytes)
    }
}

pub fn builder(template: &Value) -> Result<PipelineBuilder, PipelineError> {
    Ok(PipelineBuilder::new()
        .with_template_source(&serde_json::to_string(template)?)?
        .with_remote_resources(false))
}

/// Render a JSON template with provided data and default options
pub fn generate_pdf(template: &Value, data: Value) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let pipeline = builder(template)?.build()?;
    let output = pipeline.render_sync(data, &RenderOptions::default())?;
    GeneratedPdf::from_output(output)
}

/// Like [`generate_pdf`], resolving relative resources against `base`.
pub fn generate_pdf_in(
    template: &Value,
    data: Value,
    base: &Path,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let pipeline = builder(template)?.with_base_path(base).build()?;
    let output = pipeline.render_sync(data, &RenderOptions::default())?;
    GeneratedPdf::from_output(output)
}

#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $expected:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $expected,
            "Expected {} pages, found {}",
            $expected,
            $pdf.page_count()
        );
    };
}

#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $needle:expr) => {
        let text = $pdf.text();
        assert!(text.contains($needle), "Expected text '{}' not found in:\n{}", $needle, text);
    };
}
