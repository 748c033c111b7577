//! Primitives for spacing and page size.
use serde::{de, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use std::hash::{Hash, Hasher};

#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Hash for Margins {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.top.to_bits().hash(state);
        self.right.to_bits().hash(state);
        self.bottom.to_bits().hash(state);
        self.left.to_bits().hash(state);
    }
}

impl Eq for Margins {}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Parse a CSS-style length value with optional unit (e.g., "10pt", "5mm", "12")
    fn parse_length(input: &str) -> Result<f32, String> {
        let input = input.trim();
        let (number, scale) = if let Some(val) = input.strip_suffix("pt") {
            (val, 1.0)
        } else if let Some(val) = input.strip_suffix("px") {
            (val, 1.0)
        } else if let Some(val) = input.strip_suffix("in") {
            (val, 72.0)
        } else if let Some(val) = input.strip_suffix("cm") {
            (val, 28.35)
        } else if let Some(val) = input.strip_suffix("mm") {
            (val, 2.835)
        } else {
            (input, 1.0)
        };
        number
            .trim()
            .parse::<f32>()
            .map(|v| v * scale)
            .map_err(|e| format!("Invalid number: {}", e))
    }

    /// Parse CSS-style shorthand (1, 2, or 4 values)
    pub fn parse_shorthand(input: &str) -> Result<Self, String> {
        let values = input
            .split_whitespace()
            .map(Self::parse_length)
            .collect::<Result<Vec<_>, _>>()?;

        match values.as_slice() {
            [all] => Ok(Margins::all(*all)),
            [vertical, horizontal] => Ok(Margins {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Margins {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            _ => Err(format!(
                "Invalid shorthand: expected 1, 2, or 4 values, got {}",
                values.len()
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Padding::deserialize(deserializer)? {
            Padding::Uniform(v) => Ok(Margins::all(v)),
            Padding::Sides {
                top,
                right,
                bottom,
                left,
            } => Ok(Margins {
                top: top.unwrap_or_default(),
                right: right.unwrap_or_default(),
                bottom: bottom.unwrap_or_default(),
                left: left.unwrap_or_default(),
            }),
        }
    }
}

/// Author-supplied padding before normalization: a bare number, a shorthand
/// string, or an object with any subset of sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Padding {
    Uniform(f32),
    Sides {
        top: Option<f32>,
        right: Option<f32>,
        bottom: Option<f32>,
        left: Option<f32>,
    },
}

impl Padding {
    pub fn sides(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Padding::Sides {
            top: Some(top),
            right: Some(right),
            bottom: Some(bottom),
            left: Some(left),
        }
    }
}

/// Normalizes padding to four sides. Absent values become zero and every
/// negative side clamps to zero independently.
pub fn normalize_padding(value: Option<&Padding>) -> Margins {
    let clamp = |v: f32| v.max(0.0);
    match value {
        None => Margins::default(),
        Some(Padding::Uniform(n)) => Margins::all(clamp(*n)),
        Some(Padding::Sides {
            top,
            right,
            bottom,
            left,
        }) => Margins {
            top: clamp(top.unwrap_or_default()),
            right: clamp(right.unwrap_or_default()),
            bottom: clamp(bottom.unwrap_or_default()),
            left: clamp(left.unwrap_or_default()),
        },
    }
}

impl Serialize for Padding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Padding::Uniform(v) => serializer.serialize_f32(*v),
            Padding::Sides {
                top,
                right,
                bottom,
                left,
            } => {
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in [("top", top), ("right", right), ("bottom", bottom), ("left", left)] {
                    if let Some(v) = value {
                        map.serialize_entry(key, v)?;
                    }
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Padding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PaddingVisitor;
        impl<'de> de::Visitor<'de> for PaddingVisitor {
            type Value = Padding;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a number, a string like '10pt 20pt', or a map of sides")
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Padding, E> {
                Ok(Padding::Uniform(value as f32))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Padding, E> {
                Ok(Padding::Uniform(value as f32))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Padding, E> {
                Ok(Padding::Uniform(value as f32))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Padding, E> {
                let m = Margins::parse_shorthand(value).map_err(E::custom)?;
                Ok(Padding::sides(m.top, m.right, m.bottom, m.left))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Padding, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let (mut top, mut right, mut bottom, mut left) = (None, None, None, None);
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "top" => top = Some(map.next_value()?),
                        "right" => right = Some(map.next_value()?),
                        "bottom" => bottom = Some(map.next_value()?),
                        "left" => left = Some(map.next_value()?),
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(Padding::Sides {
                    top,
                    right,
                    bottom,
                    left,
                })
            }
        }
        deserializer.deserialize_any(PaddingVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom {
        width: f32,
        height: f32,
    },
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageSize::A4 => serializer.serialize_str("A4"),
            PageSize::Letter => serializer.serialize_str("Letter"),
            PageSize::Legal => serializer.serialize_str("Legal"),
            PageSize::Custom { width, height } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", width)?;
                map.serialize_entry("height", height)?;
                map.end()
            }
        }
    }
}

impl PageSize {
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }

    /// Parse a page size name (e.g., "A4", "Letter", "Legal")
    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            _ => Err(format!("Unknown page size: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Str(String),
            Map { width: f32, height: f32 },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            PageSizeDef::Map { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_from_number() {
        let p: Padding = serde_json::from_str("6").unwrap();
        assert_eq!(normalize_padding(Some(&p)), Margins::all(6.0));
    }

    #[test]
    fn test_padding_from_partial_object() {
        let p: Padding = serde_json::from_str(r#"{"top": 4, "left": -2}"#).unwrap();
        let m = normalize_padding(Some(&p));
        assert_eq!(m.top, 4.0);
        assert_eq!(m.left, 0.0);
        assert_eq!(m.right, 0.0);
        assert_eq!(m.bottom, 0.0);
    }

    #[test]
    fn test_padding_from_shorthand() {
        let p: Padding = serde_json::from_str(r#""2 4""#).unwrap();
        let m = normalize_padding(Some(&p));
        assert_eq!(m, Margins { top: 2.0, right: 4.0, bottom: 2.0, left: 4.0 });
    }

    #[test]
    fn test_margins_units() {
        let m = Margins::parse_shorthand("1in 10mm").unwrap();
        assert_eq!(m.top, 72.0);
        assert!((m.left - 28.35).abs() < 0.01);
        assert!(Margins::parse_shorthand("1 2 3").is_err());
    }

    #[test]
    fn test_page_size_names() {
        let size: PageSize = serde_json::from_str(r#""letter""#).unwrap();
        assert_eq!(size.dimensions_pt(), (612.0, 792.0));
        let custom: PageSize = serde_json::from_str(r#"{"width": 100, "height": 200}"#).unwrap();
        assert_eq!(custom.dimensions_pt(), (100.0, 200.0));
    }
}
