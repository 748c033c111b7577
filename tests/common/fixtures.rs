use serde_json::{Value, json};

/// A 300x300pt page without margins and one section holding `bands`.
pub fn single_section(bands: Value) -> Value {
    json!({
        "page": {"width": 300, "height": 300, "margins": 0},
        "sections": [{"bands": bands}]
    })
}

pub fn band(band_type: &str, height: f32, elements: Vec<Value>) -> Value {
    json!({"type": band_type, "height": height, "elements": elements})
}

/// A detail band repeated over the array at `data_source`.
pub fn detail(data_source: &str, height: f32, elements: Vec<Value>) -> Value {
    json!({"type": "detail", "height": height, "dataSource": data_source, "elements": elements})
}

/// A full-width single-line text element with literal content.
pub fn text(id: &str, content: &str) -> Value {
    json!({
        "id": id, "type": "text",
        "x": 0, "y": 0, "width": 280, "height": 16,
        "properties": {"text": content}
    })
}

/// A text element bound to a data field.
pub fn field(id: &str, path: &str) -> Value {
    json!({
        "id": id, "type": "text",
        "x": 0, "y": 0, "width": 280, "height": 16,
        "properties": {"field": path}
    })
}

pub fn image(id: &str, src: &str) -> Value {
    json!({
        "id": id, "type": "image",
        "x": 0, "y": 0, "width": 40, "height": 20,
        "properties": {"src": src}
    })
}

pub fn rows(count: usize) -> Value {
    json!({
        "rows": (1..=count)
            .map(|i| json!({"name": format!("Item {}", i), "qty": i}))
            .collect::<Vec<_>>()
    })
}
