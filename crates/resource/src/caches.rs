use crate::cache::SingleFlightCache;
use crate::loaded::LoadedImage;
use crate::loader::{ResourceConfig, ResourceFetcher, ResourceLoader};
use crate::source::ResourceSource;
use folio_traits::{ImageGenerator, ResourceError};
use folio_types::SourceKey;
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;

/// The image, barcode and chart caches used by one pipeline.
///
/// Images are keyed by their canonical source string. Generated images are
/// keyed by the canonical JSON of their generation spec, so two elements
/// with identical specs share one generator call.
pub struct ResourceCaches {
    fetcher: Arc<dyn ResourceFetcher>,
    barcode_generator: Option<Arc<dyn ImageGenerator>>,
    chart_generator: Option<Arc<dyn ImageGenerator>>,
    images: SingleFlightCache<SourceKey, Arc<LoadedImage>>,
    barcodes: SingleFlightCache<SourceKey, Arc<LoadedImage>>,
    charts: SingleFlightCache<SourceKey, Arc<LoadedImage>>,
}

impl ResourceCaches {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self {
            fetcher,
            barcode_generator: None,
            chart_generator: None,
            images: SingleFlightCache::new(),
            barcodes: SingleFlightCache::new(),
            charts: SingleFlightCache::new(),
        }
    }

    pub fn from_config(config: ResourceConfig) -> Self {
        Self::new(Arc::new(ResourceLoader::new(config)))
    }

    pub fn with_barcode_generator(mut self, generator: Arc<dyn ImageGenerator>) -> Self {
        self.barcode_generator = Some(generator);
        self
    }

    pub fn with_chart_generator(mut self, generator: Arc<dyn ImageGenerator>) -> Self {
        self.chart_generator = Some(generator);
        self
    }

    /// Loads and inspects the image at `source`, sharing in-flight loads.
    pub async fn image(&self, source: &str) -> Result<Arc<LoadedImage>, ResourceError> {
        let source = ResourceSource::parse(source)?;
        let key = source.key();
        let fetcher = self.fetcher.clone();
        self.images
            .get_or_load(key.clone(), move || async move {
                let bytes = fetcher.fetch(&source).await?;
                LoadedImage::from_bytes(key, bytes).map(Arc::new)
            })
            .await
    }

    pub async fn barcode(&self, spec: &Value) -> Result<Arc<LoadedImage>, ResourceError> {
        Self::generate(&self.barcodes, self.barcode_generator.as_ref(), "barcode", spec).await
    }

    pub async fn chart(&self, spec: &Value) -> Result<Arc<LoadedImage>, ResourceError> {
        Self::generate(&self.charts, self.chart_generator.as_ref(), "chart", spec).await
    }

    async fn generate(
        cache: &SingleFlightCache<SourceKey, Arc<LoadedImage>>,
        generator: Option<&Arc<dyn ImageGenerator>>,
        what: &str,
        spec: &Value,
    ) -> Result<Arc<LoadedImage>, ResourceError> {
        let generator = generator
            .cloned()
            .ok_or_else(|| ResourceError::Generation(format!("no {} generator configured", what)))?;
        // serde_json maps keep keys sorted, so this is canonical.
        let key = SourceKey::new(format!("{}:{}", what, spec));
        let spec = spec.clone();
        cache
            .get_or_load(key.clone(), move || async move {
                log::debug!("Generating {} with '{}'", key, generator.name());
                let bytes = generator.generate(&spec).await?;
                LoadedImage::from_bytes(key, bytes).map(Arc::new)
            })
            .await
    }

    /// Resolves many image sources concurrently. Duplicate sources share
    /// one fetch through the image cache.
    pub async fn prefetch_images<'a, I>(&self, sources: I) -> Vec<(String, Result<Arc<LoadedImage>, ResourceError>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sources: Vec<&str> = sources.into_iter().collect();
        log::info!("Prefetching {} image source(s)", sources.len());
        let results = join_all(sources.iter().map(|s| self.image(s))).await;
        sources
            .into_iter()
            .map(str::to_string)
            .zip(results)
            .collect()
    }

    pub fn cached_image_count(&self) -> usize {
        self.images.len()
    }
}
