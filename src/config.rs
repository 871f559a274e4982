//! Configuration of the media methods.

use crate::source::{default_resolver, PathResolver};
use std::sync::Arc;

/// API version requested by [`Media::get`](crate::Media::get) when the query
/// does not name one.
pub const DEFAULT_API_VERSION: &str = "1.2";

/// Settings shared by all media methods of a client.
///
/// # Examples
///
/// ```
/// use wpcom_media::{MediaConfig, Passthrough};
///
/// let config = MediaConfig::builder()
///     .api_version("1.1")
///     .resolver(Passthrough)
///     .build();
///
/// assert_eq!(config.api_version(), "1.1");
/// ```
#[derive(Clone, Debug)]
pub struct MediaConfig {
    api_version: String,
    resolver: Arc<dyn PathResolver>,
    boundary: Option<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MediaConfig {
    /// Create a builder starting from the default settings.
    pub fn builder() -> MediaConfigBuilder {
        MediaConfigBuilder::default()
    }

    /// API version used for fetching media.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Resolver for paths given as media.
    pub fn resolver(&self) -> &Arc<dyn PathResolver> {
        &self.resolver
    }

    /// Fixed multipart boundary, if one was configured.
    pub fn boundary(&self) -> Option<&str> {
        self.boundary.as_deref()
    }
}

/// Builder for [`MediaConfig`].
#[derive(Debug)]
pub struct MediaConfigBuilder {
    api_version: String,
    resolver: Arc<dyn PathResolver>,
    boundary: Option<String>,
}

impl Default for MediaConfigBuilder {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_owned(),
            resolver: default_resolver(),
            boundary: None,
        }
    }
}

impl MediaConfigBuilder {
    /// Set the API version requested when fetching media.
    pub fn api_version<V: Into<String>>(mut self, version: V) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the resolver used for paths given as media.
    pub fn resolver<R>(mut self, resolver: R) -> Self
    where
        R: PathResolver + 'static,
    {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Use a fixed multipart boundary instead of a random one.
    ///
    /// Mostly useful for reproducible request bodies in tests.
    pub fn boundary<B: Into<String>>(mut self, boundary: B) -> Self {
        self.boundary = Some(boundary.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> MediaConfig {
        MediaConfig {
            api_version: self.api_version,
            resolver: self.resolver,
            boundary: self.boundary,
        }
    }
}
