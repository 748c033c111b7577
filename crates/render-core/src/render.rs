//! The second pass: draws a finished layout page by page, with page totals
//! and anchors known.

use crate::error::RenderError;
use crate::plugin::RenderContext;
use crate::registry::PluginRegistry;
use crate::surface::PageSurface;
use crate::tokens::RenderScope;
use crate::transform::to_page_rect;
use folio_layout::{AnchorMap, MeasuredElement, Page, PageGeometry, PlacedBand, TableSlice};
use folio_style::{ResolvedStyle, resolve_style};
use folio_template::{Element, Template};
use folio_types::{Color, Diagnostic, Diagnostics, Point, Rect};
use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;

pub struct PageRenderer<'a> {
    pub registry: &'a PluginRegistry,
    pub template: &'a Template,
    pub anchors: &'a AnchorMap,
    pub root: &'a Value,
    pub total_pages: usize,
}

/// Position of an element being drawn, in template space relative to the
/// page content area.
struct Placement<'p> {
    origin: Point,
    geometry: &'p PageGeometry,
    band: &'p PlacedBand,
    table_slice: Option<TableSlice>,
}

impl PageRenderer<'_> {
    /// Draws background bands, then every placed band in order.
    pub async fn render_page(
        &self,
        page: &Page,
        surface: &mut dyn PageSurface,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), RenderError> {
        log::debug!("Rendering page {} of {}", page.page_number, self.total_pages);
        for placed in page.background.iter().chain(&page.bands) {
            let origin = Point::new(placed.x_offset, placed.offset_y);
            self.render_band(placed, &page.geometry, origin, surface, diagnostics)
                .await?;
        }
        Ok(())
    }

    fn render_band<'b>(
        &'b self,
        placed: &'b PlacedBand,
        geometry: &'b PageGeometry,
        origin: Point,
        surface: &'b mut dyn PageSurface,
        diagnostics: &'b mut Diagnostics,
    ) -> BoxFuture<'b, Result<(), RenderError>> {
        async move {
            for (index, element, measured) in placed.drawn_elements() {
                let table_slice = placed
                    .table_slice
                    .filter(|slice| slice.element_index == index);
                let placement = Placement {
                    origin: origin.offset(element.x, placed.element_y(index, element)),
                    geometry,
                    band: placed,
                    table_slice,
                };
                self.render_element(element, measured, placement, &mut *surface, &mut *diagnostics)
                    .await?;
            }
            Ok(())
        }
        .boxed()
    }

    fn render_element<'b>(
        &'b self,
        element: &'b Element,
        measured: &'b MeasuredElement,
        placement: Placement<'b>,
        surface: &'b mut dyn PageSurface,
        diagnostics: &'b mut Diagnostics,
    ) -> BoxFuture<'b, Result<(), RenderError>> {
        async move {
            let Some(plugin) = self.registry.get(&element.kind) else {
                log::debug!("Skipping element '{}' of unknown type '{}'", element.id, element.kind);
                return Ok(());
            };
            let style = resolve_style(element, &self.template.styles, self.template.default_style.as_ref());
            let props = plugin.resolve_props(&element.properties);
            let height = match (placement.table_slice, &measured.table) {
                (Some(slice), Some(table)) => {
                    let header = if slice.header { table.header_height } else { 0.0 };
                    header + table.rows_height(slice.start_row..slice.end_row)
                }
                _ => measured.size.height,
            };
            let local = Rect::new(placement.origin.x, placement.origin.y, measured.size.width, height);
            let rect = to_page_rect(local, placement.geometry);

            surface.save_state();
            if element.rotation != 0.0 {
                let center = Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
                surface.rotate(center, element.rotation);
            }
            if style.opacity < 1.0 {
                surface.set_opacity(style.opacity);
            }
            paint_box(surface, rect, &style);

            let scope = RenderScope {
                scope: &placement.band.scope,
                total_pages: self.total_pages,
                anchors: self.anchors,
                root: self.root,
            };
            let mut ctx = RenderContext {
                surface: &mut *surface,
                rect,
                style: &style,
                measured,
                table_slice: placement.table_slice,
                scope,
                resources: self.registry.resources(),
                diagnostics: &mut *diagnostics,
            };
            if let Err(err) = plugin.render(element, &props, &mut ctx).await {
                if err.is_fatal() {
                    return Err(err);
                }
                diagnostics.push(
                    Diagnostic::warning(err.diagnostic_kind(), format!("could not render: {}", err))
                        .with_element(&element.id)
                        .on_page(placement.band.scope.page_number),
                );
                draw_placeholder(surface, rect);
            }

            for (child, child_measured) in element.children.iter().zip(&measured.children) {
                let Some(child_measured) = child_measured else {
                    continue;
                };
                let child_placement = Placement {
                    origin: placement.origin.offset(child.x, child.y),
                    geometry: placement.geometry,
                    band: placement.band,
                    table_slice: None,
                };
                self.render_element(child, child_measured, child_placement, &mut *surface, &mut *diagnostics)
                    .await?;
            }

            if let Some(frame) = &measured.frame {
                surface.save_state();
                surface.clip(rect);
                for nested in &frame.bands {
                    let origin = placement.origin.offset(nested.x_offset, nested.offset_y);
                    self.render_band(nested, placement.geometry, origin, &mut *surface, &mut *diagnostics)
                        .await?;
                }
                surface.restore_state();
            }

            surface.restore_state();
            Ok(())
        }
        .boxed()
    }
}

/// Background and border from the resolved style.
fn paint_box(surface: &mut dyn PageSurface, rect: Rect, style: &ResolvedStyle) {
    if let Some(background) = &style.background_color {
        surface.fill_rect(rect, background);
    }
    if style.border_width > 0.0 {
        surface.stroke_rect(rect, &style.border_color, style.border_width);
    }
}

/// A crossed-out gray box marking content that failed to render.
fn draw_placeholder(surface: &mut dyn PageSurface, rect: Rect) {
    let gray = Color::gray(160);
    surface.fill_rect(rect, &Color::gray(235));
    surface.stroke_rect(rect, &gray, 0.5);
    surface.line(
        Point::new(rect.x, rect.y),
        Point::new(rect.right(), rect.bottom()),
        &gray,
        0.5,
    );
    surface.line(
        Point::new(rect.x, rect.bottom()),
        Point::new(rect.right(), rect.y),
        &gray,
        0.5,
    );
}
