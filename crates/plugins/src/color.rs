use folio_render_core::{Props, ValidationError};
use folio_types::Color;
use serde_json::Value;

/// Reads a color property (`"#RGB"`, `"#RRGGBB"` or `{r,g,b,a}`).
pub(crate) fn color_prop(props: &Props, key: &str) -> Option<Color> {
    props
        .get(key)
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

/// Records an error when `key` is set but is not a color.
pub(crate) fn check_color(props: &Props, key: &str, errors: &mut Vec<ValidationError>) {
    match props.get(key) {
        None | Some(Value::Null) => {}
        Some(_) if color_prop(props, key).is_some() => {}
        Some(other) => errors.push(ValidationError::new(key, format!("is not a color: {}", other))),
    }
}

/// Records an error when `key` is set to something outside `allowed`.
pub(crate) fn check_one_of(props: &Props, key: &str, allowed: &[&str], errors: &mut Vec<ValidationError>) {
    if let Some(value) = props.get(key).filter(|v| !v.is_null()) {
        let ok = value.as_str().is_some_and(|s| allowed.contains(&s));
        if !ok {
            errors.push(ValidationError::new(
                key,
                format!("must be one of {}, got {}", allowed.join(", "), value),
            ));
        }
    }
}
