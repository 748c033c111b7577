//! Newtype wrappers for semantic identifiers.
//!
//! These keep anchor ids and resource cache keys from being mixed up even
//! though both are plain strings underneath.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(value: impl Into<Arc<str>>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// A named anchor that cross-references resolve to a page number.
    AnchorId
);

string_id!(
    /// Canonical key of an externally loaded or generated resource
    /// (a URL, a data URI, a file path, or a serialized generation spec).
    SourceKey
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_anchor_id_creation() {
        let id1 = AnchorId::new("section-1");
        let id2 = AnchorId::from("section-1");
        let id3 = AnchorId::from(String::from("section-1"));

        assert_eq!(id1, id2);
        assert_eq!(id2, id3);
        assert_eq!(id1.as_str(), "section-1");
    }

    #[test]
    fn test_lookup_by_str() {
        let mut anchors = HashMap::new();
        anchors.insert(AnchorId::new("totals"), 3usize);
        assert_eq!(anchors.get("totals"), Some(&3));
    }

    #[test]
    fn test_source_key_display() {
        let key = SourceKey::new("https://example.com/logo.png");
        assert_eq!(key.to_string(), "https://example.com/logo.png");
    }
}
