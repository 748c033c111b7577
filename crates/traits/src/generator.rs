//! Seam to external rasterizers for generated images (barcodes, charts).

use crate::resource::{ResourceError, SharedBytes};
use async_trait::async_trait;
use serde_json::Value;

/// Turns a generation spec into encoded image bytes (PNG or JPEG).
///
/// The spec is the element's resolved properties. Implementations are
/// external collaborators; folio only caches and embeds their output.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, spec: &Value) -> Result<SharedBytes, ResourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Fixed;

    #[async_trait]
    impl ImageGenerator for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn generate(&self, spec: &Value) -> Result<SharedBytes, ResourceError> {
            match spec.get("value") {
                Some(_) => Ok(Arc::new(vec![1, 2, 3])),
                None => Err(ResourceError::Generation("missing value".into())),
            }
        }
    }

    #[tokio::test]
    async fn test_generator_object_safety() {
        let generator: Arc<dyn ImageGenerator> = Arc::new(Fixed);
        let ok = generator.generate(&serde_json::json!({"value": "x"})).await;
        assert_eq!(ok.unwrap().len(), 3);
        let err = generator.generate(&serde_json::json!({})).await;
        assert!(matches!(err, Err(ResourceError::Generation(_))));
    }
}
