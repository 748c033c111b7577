//! Data tables that split across pages at row boundaries.
//!
//! Measurement reports the header and per-row heights as
//! [`TableMetrics`]; the layout engine decides where to split and hands the
//! row range back through `RenderContext::table_slice`.

use crate::color::{check_color, color_prop};
use crate::text::TextBlock;
use async_trait::async_trait;
use folio_layout::{ElementMeasure, TableMetrics};
use folio_render_core::{
    ElementPlugin, MeasureContext, Props, PropsExt, RenderContext, RenderError, ValidationError,
    merge_defaults,
};
use folio_style::{FontWeight, Margins, ResolvedStyle, TextAlign};
use folio_template::{DataPath, Element, display_value};
use folio_types::{Color, Rect, Size};
use serde::Deserialize;
use serde_json::{Value, json};

pub struct TablePlugin;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableColumn {
    #[serde(default)]
    header: String,
    #[serde(default)]
    field: Option<String>,
    #[serde(default)]
    width: Option<f32>,
    #[serde(default)]
    align: Option<TextAlign>,
}

/// Columns, cell text and row heights for one table at one width.
struct TableLayout {
    columns: Vec<TableColumn>,
    widths: Vec<f32>,
    header: Vec<TextBlock>,
    rows: Vec<Vec<TextBlock>>,
    header_height: f32,
    row_heights: Vec<f32>,
    padding: Margins,
}

impl TableLayout {
    fn build(props: &Props, rows: &[Value], style: &ResolvedStyle, width: f32) -> Result<Self, RenderError> {
        let columns = parse_columns(props)?;
        let widths = column_widths(&columns, width);
        let padding = Margins::all(props.f32_prop("cellPadding").unwrap_or(4.0).max(0.0));
        let cell_style = ResolvedStyle {
            padding,
            ..style.clone()
        };
        let header_style = ResolvedStyle {
            font_weight: FontWeight::Bold,
            ..cell_style.clone()
        };

        let header: Vec<TextBlock> = columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| TextBlock::layout(&c.header, &header_style, *w, true))
            .collect();
        let has_header = columns.iter().any(|c| !c.header.is_empty());
        let header_height = if has_header {
            row_height(&header, &padding, style)
        } else {
            0.0
        };

        let rows: Vec<Vec<TextBlock>> = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .zip(&widths)
                    .enumerate()
                    .map(|(i, (c, w))| TextBlock::layout(&cell_text(row, c, i), &cell_style, *w, true))
                    .collect()
            })
            .collect();
        let row_heights = rows.iter().map(|cells| row_height(cells, &padding, style)).collect();

        Ok(Self {
            columns,
            widths,
            header,
            rows,
            header_height,
            row_heights,
            padding,
        })
    }

    fn metrics(&self, header_repeat: bool) -> TableMetrics {
        TableMetrics {
            header_height: self.header_height,
            row_heights: self.row_heights.clone(),
            header_repeat,
        }
    }
}

fn parse_columns(props: &Props) -> Result<Vec<TableColumn>, RenderError> {
    let value = props.get("columns").cloned().unwrap_or(Value::Null);
    let columns: Vec<TableColumn> = serde_json::from_value(value)
        .map_err(|e| RenderError::InvalidProperties(format!("table columns: {}", e)))?;
    if columns.is_empty() {
        return Err(RenderError::InvalidProperties("table has no columns".into()));
    }
    Ok(columns)
}

/// Fixed widths first; the rest of `total` is shared by the other columns.
fn column_widths(columns: &[TableColumn], total: f32) -> Vec<f32> {
    let fixed: f32 = columns.iter().filter_map(|c| c.width).map(|w| w.max(0.0)).sum();
    let flexible = columns.iter().filter(|c| c.width.is_none()).count();
    let share = if flexible == 0 {
        0.0
    } else {
        ((total - fixed) / flexible as f32).max(0.0)
    };
    columns.iter().map(|c| c.width.map_or(share, |w| w.max(0.0))).collect()
}

/// At least one line tall, so empty rows still take space.
fn row_height(cells: &[TextBlock], padding: &Margins, style: &ResolvedStyle) -> f32 {
    let lines = cells.iter().map(|c| c.lines.len()).max().unwrap_or(0).max(1);
    lines as f32 * style.line_advance() + padding.vertical()
}

fn cell_text(row: &Value, column: &TableColumn, index: usize) -> String {
    match (row, &column.field) {
        (Value::Array(cells), None) => cells.get(index).map(display_value).unwrap_or_default(),
        (_, Some(field)) => DataPath::parse(field).resolve(row).map(display_value).unwrap_or_default(),
        (scalar, None) if index == 0 => display_value(scalar),
        _ => String::new(),
    }
}

impl TablePlugin {
    fn rows<'v>(props: &'v Props, resolve: impl FnOnce(&str) -> Option<&'v Value>) -> Result<&'v [Value], RenderError> {
        let value = match props.get("rows") {
            Some(Value::String(path)) => resolve(path),
            Some(Value::Null) | None => None,
            other => other,
        };
        match value {
            Some(Value::Array(rows)) => Ok(rows),
            Some(Value::Null) | None => Ok(&[]),
            Some(other) => Err(RenderError::InvalidProperties(format!(
                "table rows must be an array, got {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl ElementPlugin for TablePlugin {
    fn kind(&self) -> &'static str {
        "table"
    }

    fn resolve_props(&self, raw: &Props) -> Props {
        merge_defaults(
            json!({
                "columns": [],
                "headerRepeat": true,
                "cellPadding": 4.0,
                "headerBackground": "#eeeeee",
                "borderColor": "#999999",
                "borderWidth": 0.5,
            }),
            raw,
        )
    }

    fn validate(&self, props: &Props) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        match parse_columns(props) {
            Err(RenderError::InvalidProperties(message)) => errors.push(ValidationError::new("columns", message)),
            Err(other) => errors.push(ValidationError::new("columns", other.to_string())),
            Ok(_) => {}
        }
        match props.get("rows") {
            None | Some(Value::Null) => errors.push(ValidationError::missing("rows")),
            Some(Value::String(_) | Value::Array(_)) => {}
            Some(other) => errors.push(ValidationError::new(
                "rows",
                format!("must be a data path or an array, got {}", other),
            )),
        }
        check_color(props, "headerBackground", &mut errors);
        check_color(props, "borderColor", &mut errors);
        errors
    }

    async fn measure(
        &self,
        element: &Element,
        props: &Props,
        ctx: &MeasureContext<'_>,
    ) -> Result<ElementMeasure, RenderError> {
        let rows = Self::rows(props, |path| ctx.resolve(path))?;
        let layout = TableLayout::build(props, rows, ctx.style, ctx.available.width)?;
        let metrics = layout.metrics(props.bool_prop("headerRepeat").unwrap_or(true));
        Ok(ElementMeasure {
            size: Size::new(element.width, metrics.total_height()),
            table: Some(metrics),
        })
    }

    async fn render(
        &self,
        _element: &Element,
        props: &Props,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), RenderError> {
        let scope = ctx.scope;
        let rows = Self::rows(props, |path| scope.resolve(path))?;
        let layout = TableLayout::build(props, rows, ctx.style, ctx.rect.width)?;
        // Split placements were decided on the measured heights.
        let (header_height, row_heights) = match &ctx.measured.table {
            Some(m) if m.row_heights.len() == layout.rows.len() => (m.header_height, m.row_heights.clone()),
            _ => (layout.header_height, layout.row_heights.clone()),
        };
        let (range, draw_header) = match ctx.table_slice {
            Some(slice) => (slice.start_row..slice.end_row.min(layout.rows.len()), slice.header),
            None => (0..layout.rows.len(), true),
        };

        let header_fill = color_prop(props, "headerBackground");
        let border = color_prop(props, "borderColor");
        let border_width = props.f32_prop("borderWidth").unwrap_or(0.5).max(0.0);
        let left = ctx.rect.x;
        let mut top = ctx.rect.y + ctx.rect.height;

        if draw_header && header_height > 0.0 {
            let header_style = ResolvedStyle {
                font_weight: FontWeight::Bold,
                ..ctx.style.clone()
            };
            draw_row(
                ctx,
                &layout,
                &layout.header,
                RowBox { left, top, height: header_height },
                &header_style,
                header_fill.as_ref(),
                border.as_ref().map(|c| (c, border_width)),
            );
            top -= header_height;
        }
        for index in range {
            let height = row_heights[index];
            let style = ctx.style.clone();
            draw_row(
                ctx,
                &layout,
                &layout.rows[index],
                RowBox { left, top, height },
                &style,
                None,
                border.as_ref().map(|c| (c, border_width)),
            );
            top -= height;
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
struct RowBox {
    left: f32,
    /// Page-space top edge.
    top: f32,
    height: f32,
}

fn draw_row(
    ctx: &mut RenderContext<'_>,
    layout: &TableLayout,
    cells: &[TextBlock],
    row: RowBox,
    style: &ResolvedStyle,
    fill: Option<&Color>,
    border: Option<(&Color, f32)>,
) {
    let mut x = row.left;
    for ((cell, width), column) in cells.iter().zip(&layout.widths).zip(&layout.columns) {
        let rect = Rect::new(x, row.top - row.height, *width, row.height);
        if let Some(fill) = fill {
            ctx.surface.fill_rect(rect, fill);
        }
        if let Some((color, w)) = border.filter(|(_, w)| *w > 0.0) {
            ctx.surface.stroke_rect(rect, color, w);
        }
        let cell_style = ResolvedStyle {
            padding: layout.padding,
            text_align: column.align.unwrap_or(style.text_align),
            ..style.clone()
        };
        cell.draw(ctx.surface, rect, &cell_style);
        x += width;
    }
}
