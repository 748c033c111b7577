use super::LayoutPass;
use super::plan::{FlowItem, SectionBands, plan_flow};
use crate::measure::{ElementMeasure, MeasureRequest, TableMetrics};
use crate::output::{FrameLayout, MeasuredElement, PlacedBand};
use crate::scope::Scope;
use folio_style::resolve_style;
use folio_template::{Band, Element};
use folio_types::{Diagnostic, DiagnosticKind, Diagnostics, Size};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

/// The table of a band, located for splitting.
#[derive(Debug, Clone)]
pub(crate) struct BandTable {
    pub element_index: usize,
    pub y: f32,
    pub metrics: TableMetrics,
    /// Band height below the table.
    pub trailing: f32,
}

#[derive(Debug, Clone)]
pub(crate) struct MeasuredBand {
    pub height: f32,
    pub elements: Vec<Option<MeasuredElement>>,
    pub table: Option<BandTable>,
}

impl MeasuredBand {
    pub fn into_placed(
        self,
        band: &Arc<Band>,
        offset_y: f32,
        x_offset: f32,
        width: f32,
        scope: &Scope,
        column: usize,
    ) -> PlacedBand {
        PlacedBand {
            band: band.clone(),
            offset_y,
            x_offset,
            width,
            measured_height: self.height,
            elements: self.elements,
            table_slice: None,
            scope: scope.clone(),
            column,
        }
    }
}

impl LayoutPass<'_> {
    /// Measures one band instance. Fixed bands keep their height unless a
    /// table reaches below it; auto-height bands grow to the lowest element
    /// bottom.
    pub(crate) fn measure_band<'b>(
        &'b self,
        band: &'b Band,
        scope: &'b Scope,
        diagnostics: &'b mut Diagnostics,
    ) -> BoxFuture<'b, MeasuredBand> {
        async move {
            let mut elements = Vec::with_capacity(band.elements.len());
            let mut content_bottom: f32 = 0.0;
            let mut table = None;
            for (index, element) in band.elements.iter().enumerate() {
                if !element.is_visible() {
                    elements.push(None);
                    continue;
                }
                let measured = self.measure_element(element, scope, diagnostics).await;
                content_bottom = content_bottom.max(element.y + measured.size.height);
                if table.is_none()
                    && let Some(metrics) = &measured.table
                {
                    table = Some((index, element.y, metrics.clone()));
                }
                elements.push(Some(measured));
            }

            let declared = if band.height.is_finite() { band.height.max(0.0) } else { 0.0 };
            // Bands always reach down to the bottom of their table.
            let table_bottom = table
                .as_ref()
                .map_or(0.0, |(_, y, metrics)| y + metrics.total_height());
            let height = if band.auto_height {
                declared.max(content_bottom)
            } else {
                declared.max(table_bottom)
            };
            let table = table.map(|(element_index, y, metrics)| BandTable {
                element_index,
                y,
                trailing: (height - (y + metrics.total_height())).max(0.0),
                metrics,
            });
            MeasuredBand {
                height,
                elements,
                table,
            }
        }
        .boxed()
    }

    fn measure_element<'b>(
        &'b self,
        element: &'b Element,
        scope: &'b Scope,
        diagnostics: &'b mut Diagnostics,
    ) -> BoxFuture<'b, MeasuredElement> {
        async move {
            let style = resolve_style(element, &self.template.styles, self.template.default_style.as_ref());
            let request = MeasureRequest {
                available: Size::new(element.width, element.height),
                style: &style,
                scope,
                root: &self.root,
            };
            let measure = match self.measurer.measure(element, &request).await {
                Ok(measure) => measure,
                Err(err) => {
                    diagnostics.push(
                        Diagnostic::warning(
                            err.kind,
                            format!("could not measure '{}' element: {}", element.kind, err.message),
                        )
                        .with_element(&element.id)
                        .on_page(scope.page_number),
                    );
                    ElementMeasure::declared(element)
                }
            };

            let (size, size_clamped) = measure.size.sanitized();
            let (table, table_clamped) = match measure.table {
                Some(metrics) => {
                    let (metrics, clamped) = metrics.sanitized();
                    (Some(metrics), clamped)
                }
                None => (None, false),
            };
            if size_clamped || table_clamped {
                diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticKind::Contract,
                        format!(
                            "'{}' element reported a negative or non-finite size; clamped to zero",
                            element.kind
                        ),
                    )
                    .with_element(&element.id),
                );
            }

            let mut children = Vec::with_capacity(element.children.len());
            for child in &element.children {
                if child.is_visible() {
                    children.push(Some(self.measure_element(child, scope, diagnostics).await));
                } else {
                    children.push(None);
                }
            }

            let frame = if element.bands.is_empty() {
                None
            } else {
                Some(self.layout_frame(element, scope, diagnostics).await)
            };

            MeasuredElement {
                size,
                table,
                children,
                frame,
            }
        }
        .boxed()
    }

    /// Lays out a frame's nested bands top to bottom inside the frame box.
    /// Frames never open pages: whatever does not fit is clipped.
    fn layout_frame<'b>(
        &'b self,
        element: &'b Element,
        scope: &'b Scope,
        diagnostics: &'b mut Diagnostics,
    ) -> BoxFuture<'b, FrameLayout> {
        async move {
            let bands = SectionBands::classify(&element.bands);
            let repeated = |list: &[Arc<Band>]| -> Vec<FlowItem> {
                list.iter()
                    .map(|band| FlowItem {
                        band: band.clone(),
                        scope: scope.clone(),
                    })
                    .collect()
            };

            let mut sequence = repeated(&bands.page_headers);
            sequence.extend(repeated(&bands.column_headers));
            sequence.extend(plan_flow(&bands, scope, &self.root, diagnostics));
            sequence.extend(repeated(&bands.column_footers));
            sequence.extend(repeated(&bands.page_footers));
            sequence.extend(repeated(&bands.last_page_footers));

            let limit = element.height.max(0.0);
            let epsilon = self.config.fit_epsilon;
            let mut placed = Vec::new();
            for band in &bands.background {
                let measured = self.measure_band(band, scope, diagnostics).await;
                placed.push(measured.into_placed(band, 0.0, 0.0, element.width, scope, 0));
            }

            let mut cursor: f32 = 0.0;
            let mut clipped = false;
            for item in sequence {
                if cursor >= limit - epsilon {
                    clipped = true;
                    break;
                }
                let measured = self.measure_band(&item.band, &item.scope, diagnostics).await;
                let height = measured.height;
                placed.push(measured.into_placed(&item.band, cursor, 0.0, element.width, &item.scope, 0));
                cursor += height;
            }
            if cursor > limit + epsilon {
                clipped = true;
            }
            if clipped {
                diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticKind::Pagination,
                        format!(
                            "frame content exceeds its {:.1}pt box; clipped",
                            limit
                        ),
                    )
                    .with_element(&element.id)
                    .on_page(scope.page_number),
                );
            }

            FrameLayout {
                bands: placed,
                content_height: cursor,
                clipped,
            }
        }
        .boxed()
    }
}
