//! Paths into the JSON data payload.
//!
//! A path is either a JSON pointer (`/orders/0/lines`) or a dotted path
//! (`orders.0.lines`, `orders[0].lines`). `$`, `/` and the empty string all
//! name the root value.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPath {
    segments: Vec<String>,
}

impl DataPath {
    pub fn parse(expr: &str) -> Self {
        let expr = expr.trim();
        if matches!(expr, "" | "$" | "/") {
            return Self { segments: Vec::new() };
        }
        let segments = if let Some(pointer) = expr.strip_prefix('/') {
            pointer
                .split('/')
                .map(|s| s.replace("~1", "/").replace("~0", "~"))
                .collect()
        } else {
            let dotted = expr.strip_prefix("$.").unwrap_or(expr);
            dotted
                .replace('[', ".")
                .replace(']', "")
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments.iter().try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

/// Resolves `expr` against the scope item first, then against the root.
pub fn lookup<'a>(expr: &str, scope_item: Option<&'a Value>, root: &'a Value) -> Option<&'a Value> {
    let path = DataPath::parse(expr);
    if path.is_root() {
        return Some(root);
    }
    scope_item
        .and_then(|item| path.resolve(item))
        .or_else(|| path.resolve(root))
}

/// Renders a scalar for display or grouping. Strings are unquoted and null
/// becomes empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
