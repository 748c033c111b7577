//! The pagination state machine.
//!
//! Per section: background, page header and column header are placed on
//! every page; title, grouped details (or noData), body and summary flow
//! through the content area; column and page footers close every page, and
//! the document's final page may swap its page footer for `lastPageFooter`.

mod measure;
mod plan;
mod section;

use crate::config::LayoutConfig;
use crate::measure::ElementMeasurer;
use crate::output::{LayoutResult, PageGeometry};
use crate::scope::Scope;
use crate::LayoutError;
use folio_template::Template;
use folio_types::Diagnostics;
use plan::{SectionBands, plan_flow};
use section::{SectionContext, SectionWriter};
use serde_json::Value;
use std::sync::Arc;

/// Lays out a template against a data payload.
pub struct LayoutEngine<'a> {
    template: &'a Template,
    measurer: &'a dyn ElementMeasurer,
    config: LayoutConfig,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(template: &'a Template, measurer: &'a dyn ElementMeasurer) -> Self {
        Self {
            template,
            measurer,
            config: LayoutConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the layout pass. Recoverable problems are pushed to
    /// `diagnostics`; only invalid geometry and the page cap are fatal.
    pub async fn layout(
        &self,
        data: Arc<Value>,
        diagnostics: &mut Diagnostics,
    ) -> Result<LayoutResult, LayoutError> {
        let pass = LayoutPass {
            template: self.template,
            measurer: self.measurer,
            config: self.config,
            root: data,
        };
        pass.run(diagnostics).await
    }
}

/// State shared by every section of one layout run.
pub(crate) struct LayoutPass<'a> {
    pub template: &'a Template,
    pub measurer: &'a dyn ElementMeasurer,
    pub config: LayoutConfig,
    pub root: Arc<Value>,
}

impl LayoutPass<'_> {
    async fn run(&self, diagnostics: &mut Diagnostics) -> Result<LayoutResult, LayoutError> {
        let sections = &self.template.sections;
        log::info!("Starting layout of {} section(s)", sections.len());

        let mut pages = Vec::new();
        for (index, section) in sections.iter().enumerate() {
            let geometry = self.template.page.merge(section.page.as_ref());
            validate_geometry(index, &geometry)?;

            let ctx = SectionContext {
                pass: self,
                section_index: index,
                geometry,
                bands: SectionBands::classify(&section.bands),
                columns: section.columns.unwrap_or_default(),
            };
            let flow = plan_flow(&ctx.bands, &Scope::for_section(index), &self.root, diagnostics);
            log::debug!("Section {}: {} flow band instance(s)", index, flow.len());

            let mut writer = SectionWriter::start(&ctx, &mut pages, diagnostics).await?;
            for item in flow {
                writer.place(item, diagnostics).await?;
            }
            writer.finish(index + 1 == sections.len(), diagnostics).await?;
        }

        log::info!("Layout produced {} page(s)", pages.len());
        Ok(LayoutResult { pages })
    }
}

fn validate_geometry(section: usize, geometry: &PageGeometry) -> Result<(), LayoutError> {
    let invalid = |reason: String| Err(LayoutError::InvalidGeometry { section, reason });
    if !(geometry.width.is_finite() && geometry.width > 0.0) {
        return invalid(format!("page width {}", geometry.width));
    }
    if !(geometry.height.is_finite() && geometry.height > 0.0) {
        return invalid(format!("page height {}", geometry.height));
    }
    if geometry.content_width() <= 0.0 {
        return invalid(format!("no content width left after margins ({})", geometry.content_width()));
    }
    if geometry.content_height() <= 0.0 {
        return invalid(format!("no content height left after margins ({})", geometry.content_height()));
    }
    Ok(())
}
