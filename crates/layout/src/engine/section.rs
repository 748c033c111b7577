//! Page writer for one section.

use super::LayoutPass;
use super::measure::{BandTable, MeasuredBand};
use super::plan::{FlowItem, SectionBands};
use crate::LayoutError;
use crate::algorithms::pagination::{check_child_fit, fit_rows};
use crate::output::{Page, PageGeometry, PlacedBand, TableSlice};
use crate::scope::Scope;
use folio_template::{Band, ColumnConfig};
use folio_types::{Diagnostic, DiagnosticKind, Diagnostics};
use std::sync::Arc;

/// Immutable per-section inputs.
pub(crate) struct SectionContext<'p, 'a> {
    pub pass: &'p LayoutPass<'a>,
    pub section_index: usize,
    pub geometry: PageGeometry,
    pub bands: SectionBands,
    pub columns: ColumnConfig,
}

type Measured = Vec<(Arc<Band>, MeasuredBand)>;

fn total_height(bands: &Measured) -> f32 {
    bands.iter().map(|(_, m)| m.height).sum()
}

/// A page still accepting flow bands.
struct OpenPage {
    page: Page,
    scope: Scope,
    column: usize,
    cursor: f32,
    /// Bottom of the page header bands; column headers start here.
    header_bottom: f32,
    flow_top: f32,
    flow_bottom: f32,
    column_has_content: bool,
    column_headers: Measured,
    column_footers: Measured,
    page_footers: Measured,
}

impl<'p, 'a> SectionContext<'p, 'a> {
    fn content_width(&self) -> f32 {
        self.geometry.content_width()
    }

    fn content_height(&self) -> f32 {
        self.geometry.content_height()
    }

    fn column_width(&self) -> f32 {
        self.columns.column_width(self.content_width())
    }

    fn column_x(&self, column: usize) -> f32 {
        self.columns.column_x(column, self.content_width())
    }

    async fn measure_all(
        &self,
        bands: &[Arc<Band>],
        scope: &Scope,
        diagnostics: &mut Diagnostics,
    ) -> Measured {
        let mut out = Vec::with_capacity(bands.len());
        for band in bands {
            let measured = self.pass.measure_band(band, scope, diagnostics).await;
            out.push((band.clone(), measured));
        }
        out
    }

    /// Opens page `page_index` (0-based, global): background and page header
    /// placed, repeating bands measured once for the page.
    async fn build_page(
        &self,
        page_index: usize,
        section_page_number: usize,
        diagnostics: &mut Diagnostics,
    ) -> Result<OpenPage, LayoutError> {
        let max_pages = self.pass.config.max_pages;
        if page_index >= max_pages {
            log::error!("Page limit of {} reached in section {}", max_pages, self.section_index);
            return Err(LayoutError::PageLimitExceeded(max_pages));
        }
        log::debug!(
            "Opening page {} (section {}, page {} of section)",
            page_index + 1,
            self.section_index,
            section_page_number
        );

        let scope =
            Scope::for_section(self.section_index).on_page(page_index + 1, section_page_number);
        let width = self.content_width();
        let mut page = Page {
            section_index: self.section_index,
            page_index,
            page_number: page_index + 1,
            section_page_number,
            geometry: self.geometry.clone(),
            background: Vec::new(),
            bands: Vec::new(),
        };

        let background = self.measure_all(&self.bands.background, &scope, diagnostics).await;
        for (band, measured) in background {
            page.background.push(measured.into_placed(&band, 0.0, 0.0, width, &scope, 0));
        }

        let mut cursor = 0.0;
        let page_headers = self.measure_all(&self.bands.page_headers, &scope, diagnostics).await;
        for (band, measured) in page_headers {
            let height = measured.height;
            page.bands.push(measured.into_placed(&band, cursor, 0.0, width, &scope, 0));
            cursor += height;
        }

        let column_headers = self
            .measure_all(&self.bands.column_headers, &scope, diagnostics)
            .await;
        let column_footers = self
            .measure_all(&self.bands.column_footers, &scope, diagnostics)
            .await;
        let page_footers = self.measure_all(&self.bands.page_footers, &scope, diagnostics).await;

        let flow_top = cursor + total_height(&column_headers);
        let flow_bottom =
            self.content_height() - total_height(&page_footers) - total_height(&column_footers);

        let mut open = OpenPage {
            page,
            scope,
            column: 0,
            cursor: flow_top,
            header_bottom: cursor,
            flow_top,
            flow_bottom,
            column_has_content: false,
            column_headers,
            column_footers,
            page_footers,
        };
        self.place_column_headers(&mut open);
        Ok(open)
    }

    fn place_column_headers(&self, open: &mut OpenPage) {
        let x = self.column_x(open.column);
        let width = self.column_width();
        let mut y = open.header_bottom;
        for (band, measured) in &open.column_headers {
            open.page
                .bands
                .push(measured.clone().into_placed(band, y, x, width, &open.scope, open.column));
            y += measured.height;
        }
    }

    /// Column footers sit directly above `bottom`, one set per opened column.
    fn place_column_footers(&self, open: &mut OpenPage, bottom: f32) {
        let width = self.column_width();
        let start = bottom - total_height(&open.column_footers);
        for column in 0..=open.column {
            let x = self.column_x(column);
            let mut y = start;
            for (band, measured) in &open.column_footers {
                open.page
                    .bands
                    .push(measured.clone().into_placed(band, y, x, width, &open.scope, column));
                y += measured.height;
            }
        }
    }

    /// Closes a page with its regular page footer.
    fn finish_page(&self, mut open: OpenPage) -> Page {
        let footers = std::mem::take(&mut open.page_footers);
        self.finish_with(open, footers)
    }

    /// Closes a page with `footers` stacked against the bottom edge.
    fn finish_with(&self, mut open: OpenPage, footers: Measured) -> Page {
        let width = self.content_width();
        let footer_top = self.content_height() - total_height(&footers);
        self.place_column_footers(&mut open, footer_top);
        let mut y = footer_top;
        for (band, measured) in footers {
            let height = measured.height;
            open.page.bands.push(measured.into_placed(&band, y, 0.0, width, &open.scope, 0));
            y += height;
        }
        log::debug!(
            "Closed page {} with {} band(s)",
            open.page.page_number,
            open.page.bands.len()
        );
        open.page
    }
}

/// Pushes flow bands onto pages, opening columns and pages as needed.
pub(crate) struct SectionWriter<'c, 'p, 'a> {
    ctx: &'c SectionContext<'p, 'a>,
    pages: &'c mut Vec<Page>,
    section_pages: usize,
    open: OpenPage,
}

impl<'c, 'p, 'a> SectionWriter<'c, 'p, 'a> {
    pub async fn start(
        ctx: &'c SectionContext<'p, 'a>,
        pages: &'c mut Vec<Page>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, LayoutError> {
        let open = ctx.build_page(pages.len(), 1, diagnostics).await?;
        Ok(Self {
            ctx,
            pages,
            section_pages: 1,
            open,
        })
    }

    fn epsilon(&self) -> f32 {
        self.ctx.pass.config.fit_epsilon
    }

    /// Moves to the next column, or closes the page and opens a new one.
    async fn advance(&mut self, diagnostics: &mut Diagnostics) -> Result<(), LayoutError> {
        if self.open.column + 1 < self.ctx.columns.column_count() {
            self.open.column += 1;
            self.open.cursor = self.open.flow_top;
            self.open.column_has_content = false;
            self.ctx.place_column_headers(&mut self.open);
            log::debug!(
                "Moved to column {} on page {}",
                self.open.column,
                self.open.page.page_number
            );
            return Ok(());
        }
        self.new_page(diagnostics).await
    }

    async fn new_page(&mut self, diagnostics: &mut Diagnostics) -> Result<(), LayoutError> {
        let next = self
            .ctx
            .build_page(self.pages.len() + 1, self.section_pages + 1, diagnostics)
            .await?;
        self.section_pages += 1;
        let finished = std::mem::replace(&mut self.open, next);
        self.pages.push(self.ctx.finish_page(finished));
        Ok(())
    }

    fn push_flow(
        &mut self,
        band: &Arc<Band>,
        scope: &Scope,
        measured: MeasuredBand,
        height: f32,
        table_slice: Option<TableSlice>,
    ) {
        let open = &mut self.open;
        let scope = scope
            .clone()
            .on_page(open.page.page_number, open.page.section_page_number);
        let mut placed = measured.into_placed(
            band,
            open.cursor,
            self.ctx.column_x(open.column),
            self.ctx.column_width(),
            &scope,
            open.column,
        );
        placed.measured_height = height;
        placed.table_slice = table_slice;
        open.page.bands.push(placed);
        open.cursor += height;
        open.column_has_content = true;
    }

    fn report_oversized(&self, label: &str, needed: f32, diagnostics: &mut Diagnostics) {
        diagnostics.push(
            Diagnostic::warning(
                DiagnosticKind::Pagination,
                format!(
                    "{} needs {:.1}pt but only {:.1}pt fit in a column; placed anyway",
                    label,
                    needed,
                    self.open.flow_bottom - self.open.flow_top
                ),
            )
            .on_page(self.open.page.page_number),
        );
    }

    /// Places one flow band instance.
    pub async fn place(
        &mut self,
        item: FlowItem,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), LayoutError> {
        let scope = item
            .scope
            .clone()
            .on_page(self.open.page.page_number, self.open.page.section_page_number);
        let measured = self.ctx.pass.measure_band(&item.band, &scope, diagnostics).await;

        loop {
            let fit = check_child_fit(
                self.open.cursor,
                measured.height,
                self.open.flow_bottom,
                self.epsilon(),
            );
            if !fit.should_break {
                let height = measured.height;
                self.push_flow(&item.band, &item.scope, measured, height, None);
                return Ok(());
            }

            let table = measured.table.clone().filter(|t| !t.metrics.row_heights.is_empty());
            if let Some(table) = table {
                return self.place_split(&item, measured, table, diagnostics).await;
            }

            if !self.open.column_has_content {
                self.report_oversized(&item.band.label(), measured.height, diagnostics);
                let height = measured.height;
                self.push_flow(&item.band, &item.scope, measured, height, None);
                return Ok(());
            }
            self.advance(diagnostics).await?;
        }
    }

    /// Splits a band at its table's row boundaries. The first slice carries
    /// the elements above the table's bottom. The last one carries those
    /// below it, moved up under the last row.
    async fn place_split(
        &mut self,
        item: &FlowItem,
        measured: MeasuredBand,
        table: BandTable,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), LayoutError> {
        let BandTable {
            element_index,
            y,
            metrics,
            trailing,
        } = table;
        let rows = metrics.row_heights.len();
        let mut next = 0;
        loop {
            let first = next == 0;
            let header = first || metrics.header_repeat;
            let prefix = if first { y } else { 0.0 };
            let header_height = if header { metrics.header_height } else { 0.0 };
            let space = self.open.flow_bottom - self.open.cursor - prefix - header_height;

            let mut count = fit_rows(&metrics.row_heights[next..], space, trailing, self.epsilon());
            if count == 0 {
                if self.open.column_has_content {
                    self.advance(diagnostics).await?;
                    continue;
                }
                let label = format!("row {} of {}", next + 1, item.band.label());
                self.report_oversized(&label, metrics.row_heights[next], diagnostics);
                count = 1;
            }

            let end = next + count;
            let last = end == rows;
            let height = prefix
                + header_height
                + metrics.rows_height(next..end)
                + if last { trailing } else { 0.0 };
            log::debug!(
                "Table slice rows {}..{} of {} on page {}",
                next,
                end,
                item.band.label(),
                self.open.page.page_number
            );
            self.push_flow(
                &item.band,
                &item.scope,
                measured.clone(),
                height,
                Some(TableSlice {
                    element_index,
                    start_row: next,
                    end_row: end,
                    header,
                    first,
                    last,
                }),
            );
            if last {
                return Ok(());
            }
            next = end;
            self.advance(diagnostics).await?;
        }
    }

    /// Closes the section's final page. On the document's last page the
    /// `lastPageFooter` bands replace the page footer, on an extra page when
    /// they do not fit below the content.
    pub async fn finish(
        mut self,
        last_section: bool,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), LayoutError> {
        let ctx = self.ctx;
        let last_page_footers = &ctx.bands.last_page_footers;
        if !last_section || last_page_footers.is_empty() {
            self.pages.push(ctx.finish_page(self.open));
            return Ok(());
        }

        let footers = ctx
            .measure_all(last_page_footers, &self.open.scope, diagnostics)
            .await;
        if !self.fits_last_footer(&footers) {
            log::debug!(
                "lastPageFooter does not fit on page {}; opening a page for it",
                self.open.page.page_number
            );
            self.new_page(diagnostics).await?;
            let footers = ctx
                .measure_all(last_page_footers, &self.open.scope, diagnostics)
                .await;
            if !self.fits_last_footer(&footers) {
                self.report_oversized("lastPageFooter", total_height(&footers), diagnostics);
            }
            self.pages.push(ctx.finish_with(self.open, footers));
            return Ok(());
        }
        self.pages.push(ctx.finish_with(self.open, footers));
        Ok(())
    }

    fn fits_last_footer(&self, footers: &Measured) -> bool {
        let used = self
            .open
            .page
            .bands
            .iter()
            .map(PlacedBand::bottom)
            .fold(0.0, f32::max);
        let needed = total_height(&self.open.column_footers) + total_height(footers);
        used + needed <= self.ctx.content_height() + self.epsilon()
    }
}
