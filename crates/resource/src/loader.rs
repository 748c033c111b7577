use crate::filesystem::FilesystemResourceProvider;
use crate::source::ResourceSource;
use async_trait::async_trait;
use folio_traits::{ResourceError, ResourceProvider, SharedBytes};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Settings for resource loading.
#[derive(Debug, Clone)]
pub struct ResourceConfig {
    /// Directory that relative paths resolve against.
    pub base_path: PathBuf,
    /// Upper bound for a single remote fetch.
    pub http_timeout: Duration,
    /// When false, `http(s)://` sources fail without a request.
    pub allow_remote: bool,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            http_timeout: Duration::from_secs(10),
            allow_remote: true,
        }
    }
}

/// Fetches the raw bytes of a source.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch(&self, source: &ResourceSource) -> Result<SharedBytes, ResourceError>;
}

/// The default fetcher: paths through a `ResourceProvider`, URLs through
/// `reqwest`, data URIs decoded in place.
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    provider: Arc<dyn ResourceProvider>,
    client: reqwest::Client,
    config: ResourceConfig,
}

impl ResourceLoader {
    pub fn new(config: ResourceConfig) -> Self {
        let provider = Arc::new(FilesystemResourceProvider::new(&config.base_path));
        Self::with_provider(config, provider)
    }

    pub fn with_provider(config: ResourceConfig, provider: Arc<dyn ResourceProvider>) -> Self {
        Self {
            provider,
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    async fn fetch_remote(&self, url: &str) -> Result<SharedBytes, ResourceError> {
        if !self.config.allow_remote {
            return Err(ResourceError::RemoteDisabled(url.to_string()));
        }
        let timeout = self.config.http_timeout;
        let to_error = |e: reqwest::Error| {
            if e.is_timeout() {
                ResourceError::Timeout {
                    url: url.to_string(),
                    millis: timeout.as_millis(),
                }
            } else {
                ResourceError::LoadFailed {
                    path: url.to_string(),
                    message: e.to_string(),
                }
            }
        };

        log::debug!("Fetching remote resource {}", url);
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(to_error)?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ResourceError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ResourceError::LoadFailed {
                path: url.to_string(),
                message: format!("HTTP {}", status),
            });
        }
        let bytes = response.bytes().await.map_err(to_error)?;
        Ok(Arc::new(bytes.to_vec()))
    }
}

#[async_trait]
impl ResourceFetcher for ResourceLoader {
    async fn fetch(&self, source: &ResourceSource) -> Result<SharedBytes, ResourceError> {
        match source {
            ResourceSource::Data { .. } => match source.decode_inline() {
                Some(decoded) => decoded.map(Arc::new),
                None => Err(ResourceError::InvalidFormat("not a data URI".into())),
            },
            ResourceSource::Remote(url) => self.fetch_remote(url).await,
            ResourceSource::Path(path) => self.provider.load(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_traits::InMemoryResourceProvider;

    fn loader_with(provider: InMemoryResourceProvider, config: ResourceConfig) -> ResourceLoader {
        ResourceLoader::with_provider(config, Arc::new(provider))
    }

    #[tokio::test]
    async fn test_loads_path_through_provider() {
        let provider = InMemoryResourceProvider::new();
        provider.add("logo.png", b"bytes".to_vec()).unwrap();
        let loader = loader_with(provider, ResourceConfig::default());

        let source = ResourceSource::parse("logo.png").unwrap();
        assert_eq!(&*loader.fetch(&source).await.unwrap(), b"bytes");
    }

    #[tokio::test]
    async fn test_decodes_data_uri() {
        let loader = loader_with(InMemoryResourceProvider::new(), ResourceConfig::default());
        let source = ResourceSource::parse("data:text/plain;base64,aGk=").unwrap();
        assert_eq!(&*loader.fetch(&source).await.unwrap(), b"hi");
    }

    #[tokio::test]
    async fn test_remote_disabled() {
        let config = ResourceConfig {
            allow_remote: false,
            ..Default::default()
        };
        let loader = loader_with(InMemoryResourceProvider::new(), config);
        let source = ResourceSource::parse("https://example.com/a.png").unwrap();
        assert!(matches!(
            loader.fetch(&source).await,
            Err(ResourceError::RemoteDisabled(_))
        ));
    }

    #[tokio::test]
    async fn test_remote_timeout_is_an_error() {
        // Accepted by the kernel backlog but never answered.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let config = ResourceConfig {
            http_timeout: Duration::from_millis(200),
            ..Default::default()
        };
        let loader = loader_with(InMemoryResourceProvider::new(), config);
        let source = ResourceSource::parse(&format!("http://{}/slow.png", addr)).unwrap();

        let result = loader.fetch(&source).await;
        assert!(matches!(result, Err(ResourceError::Timeout { millis: 200, .. })));
        drop(listener);
    }
}
