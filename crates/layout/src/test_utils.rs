use crate::measure::{ElementMeasure, ElementMeasurer, MeasureError, MeasureRequest, TableMetrics};
use crate::{LayoutConfig, LayoutEngine, LayoutError, LayoutResult};
use async_trait::async_trait;
use folio_template::{Element, Template};
use folio_types::{DiagnosticKind, Diagnostics, Size};
use serde_json::{Value, json};
use std::sync::Arc;

/// Reports declared boxes, with a few properties to steer it:
/// `fail` (error message), `measuredHeight` and `table`
/// (`{"header": h, "rows": [..], "repeatHeader": bool}`).
pub struct FixedMeasurer;

#[async_trait]
impl ElementMeasurer for FixedMeasurer {
    async fn measure(
        &self,
        element: &Element,
        _request: &MeasureRequest<'_>,
    ) -> Result<ElementMeasure, MeasureError> {
        let props = &element.properties;
        if let Some(message) = props.get("fail").and_then(Value::as_str) {
            return Err(MeasureError::new(DiagnosticKind::Resource, message));
        }
        if let Some(table) = props.get("table") {
            let metrics = TableMetrics {
                header_height: table["header"].as_f64().unwrap_or(0.0) as f32,
                row_heights: table["rows"]
                    .as_array()
                    .map(|rows| rows.iter().filter_map(Value::as_f64).map(|h| h as f32).collect())
                    .unwrap_or_default(),
                header_repeat: table["repeatHeader"].as_bool().unwrap_or(false),
            };
            return Ok(ElementMeasure {
                size: Size::new(element.width, metrics.total_height()),
                table: Some(metrics),
            });
        }
        if let Some(height) = props.get("measuredHeight").and_then(Value::as_f64) {
            return Ok(ElementMeasure::fixed(Size::new(element.width, height as f32)));
        }
        Ok(ElementMeasure::declared(element))
    }
}

/// A 200x200pt page without margins holding one section of `bands`.
pub fn single_section(bands: Value) -> Template {
    Template::from_value(json!({
        "page": {"width": 200, "height": 200, "margins": 0},
        "sections": [{"bands": bands}]
    }))
    .unwrap()
}

pub fn rows(count: usize) -> Value {
    json!({ "rows": (0..count).map(|i| json!({"n": i})).collect::<Vec<_>>() })
}

pub async fn run(template: &Template, data: Value) -> (LayoutResult, Diagnostics) {
    let (result, diags) = try_run(template, data, LayoutConfig::default()).await;
    (result.unwrap(), diags)
}

pub async fn try_run(
    template: &Template,
    data: Value,
    config: LayoutConfig,
) -> (Result<LayoutResult, LayoutError>, Diagnostics) {
    let _ = env_logger::builder().is_test(true).try_init();
    let measurer = FixedMeasurer;
    let mut diags = Diagnostics::new();
    let result = LayoutEngine::new(template, &measurer)
        .with_config(config)
        .layout(Arc::new(data), &mut diags)
        .await;
    (result, diags)
}
