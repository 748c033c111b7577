use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use folio_traits::ResourceError;
use folio_types::SourceKey;

/// A classified resource source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSource {
    /// An inline `data:` URI.
    Data {
        raw: String,
        media_type: String,
        base64: bool,
        payload: String,
    },
    /// An `http://` or `https://` URL.
    Remote(String),
    /// A path resolved by the configured `ResourceProvider`.
    Path(String),
}

impl ResourceSource {
    pub fn parse(input: &str) -> Result<Self, ResourceError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ResourceError::InvalidFormat("empty resource source".into()));
        }
        if let Some(rest) = input.strip_prefix("data:") {
            let (header, payload) = rest.split_once(',').ok_or_else(|| {
                ResourceError::InvalidFormat("data URI is missing ','".to_string())
            })?;
            let base64 = header.ends_with(";base64");
            let media_type = header.trim_end_matches(";base64").to_string();
            return Ok(ResourceSource::Data {
                raw: input.to_string(),
                media_type,
                base64,
                payload: payload.to_string(),
            });
        }
        let lower = input.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(ResourceSource::Remote(input.to_string()));
        }
        let path = input.strip_prefix("file://").unwrap_or(input);
        let path = path.strip_prefix("./").unwrap_or(path);
        Ok(ResourceSource::Path(path.to_string()))
    }

    /// The canonical cache key of this source.
    pub fn key(&self) -> SourceKey {
        match self {
            ResourceSource::Data { raw, .. } => SourceKey::new(raw.as_str()),
            ResourceSource::Remote(url) => SourceKey::new(url.as_str()),
            ResourceSource::Path(path) => SourceKey::new(path.as_str()),
        }
    }

    /// Decodes the payload of a `data:` URI. Returns `None` for other sources.
    pub fn decode_inline(&self) -> Option<Result<Vec<u8>, ResourceError>> {
        let ResourceSource::Data {
            base64, payload, ..
        } = self
        else {
            return None;
        };
        let decoded = if *base64 {
            let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
            BASE64
                .decode(compact.as_bytes())
                .map_err(|e| ResourceError::InvalidFormat(format!("bad base64 in data URI: {}", e)))
        } else {
            Ok(percent_encoding::percent_decode_str(payload).collect())
        };
        Some(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_sources() {
        assert!(matches!(
            ResourceSource::parse("https://example.com/a.png").unwrap(),
            ResourceSource::Remote(_)
        ));
        assert_eq!(
            ResourceSource::parse("./img/logo.png").unwrap(),
            ResourceSource::Path("img/logo.png".into())
        );
        assert!(matches!(
            ResourceSource::parse("data:image/png;base64,iVBORw0K").unwrap(),
            ResourceSource::Data { base64: true, .. }
        ));
        assert!(ResourceSource::parse("  ").is_err());
        assert!(ResourceSource::parse("data:nocomma").is_err());
    }

    #[test]
    fn test_decode_base64_data_uri() {
        let src = ResourceSource::parse("data:text/plain;base64,aGVsbG8=").unwrap();
        assert_eq!(src.decode_inline().unwrap().unwrap(), b"hello");
    }

    #[test]
    fn test_decode_percent_data_uri() {
        let src = ResourceSource::parse("data:text/plain,a%20b%2Fc").unwrap();
        assert_eq!(src.decode_inline().unwrap().unwrap(), b"a b/c");
        assert!(ResourceSource::Path("x".into()).decode_inline().is_none());
    }

    #[test]
    fn test_invalid_base64() {
        let src = ResourceSource::parse("data:image/png;base64,!!!").unwrap();
        assert!(matches!(
            src.decode_inline(),
            Some(Err(ResourceError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_key_is_canonical_source() {
        let a = ResourceSource::parse("./logo.png").unwrap();
        let b = ResourceSource::parse("logo.png").unwrap();
        assert_eq!(a.key(), b.key());
    }
}
