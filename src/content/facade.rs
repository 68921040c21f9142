//! Content source selection
//!
//! The backend is chosen once, from `NEXT_PUBLIC_USE_SANITY`, when the facade
//! is built. Every consumer then shares the same source; calls are never
//! routed per request.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::client::SanityConfig;
use super::static_source::StaticContentSource;
use super::{ContentError, ContentSource};

/// Environment variable that selects the CMS backend
pub const USE_SANITY_ENV: &str = "NEXT_PUBLIC_USE_SANITY";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentBackend {
    #[default]
    Static,
    Sanity,
}

impl ContentBackend {
    /// Interpret the flag value: only `"true"` (trimmed, any case) selects
    /// Sanity.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            None => {
                warn!("{} is not set, using static content", USE_SANITY_ENV);
                ContentBackend::Static
            }
            Some(value) if value.trim().eq_ignore_ascii_case("true") => ContentBackend::Sanity,
            Some(_) => ContentBackend::Static,
        }
    }

    /// Read the flag from the process environment
    pub fn from_env() -> Self {
        Self::from_flag(std::env::var(USE_SANITY_ENV).ok().as_deref())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentBackend::Static => "static",
            ContentBackend::Sanity => "sanity",
        }
    }
}

impl fmt::Display for ContentBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single entry point to content, bound to one source for its lifetime
///
/// Derefs to the bound [`ContentSource`], so every trait method is available
/// directly on the facade.
#[derive(Clone)]
pub struct ContentFacade {
    backend: ContentBackend,
    source: Arc<dyn ContentSource>,
}

impl ContentFacade {
    /// Build the source for `backend`
    ///
    /// # Example
    ///
    /// ```rust
    /// use summit_content::content::{ContentBackend, ContentFacade};
    ///
    /// let facade = ContentFacade::new(ContentBackend::Static, None).unwrap();
    /// assert_eq!(facade.name(), "Static JSON");
    /// ```
    pub fn new(
        backend: ContentBackend,
        sanity_config: Option<SanityConfig>,
    ) -> Result<Self, ContentError> {
        let source: Arc<dyn ContentSource> = match backend {
            ContentBackend::Static => Arc::new(StaticContentSource::new()?),
            ContentBackend::Sanity => sanity_source(sanity_config)?,
        };
        Ok(Self::from_source(backend, source))
    }

    /// Select the backend from `NEXT_PUBLIC_USE_SANITY` and build it
    pub fn from_env(sanity_config: Option<SanityConfig>) -> Result<Self, ContentError> {
        Self::new(ContentBackend::from_env(), sanity_config)
    }

    /// Wrap an already built source
    pub fn from_source(backend: ContentBackend, source: Arc<dyn ContentSource>) -> Self {
        info!("Content source: {} ({})", source.name(), backend);
        Self { backend, source }
    }

    pub fn backend(&self) -> ContentBackend {
        self.backend
    }

    pub fn source(&self) -> Arc<dyn ContentSource> {
        Arc::clone(&self.source)
    }
}

impl Deref for ContentFacade {
    type Target = dyn ContentSource;

    fn deref(&self) -> &Self::Target {
        self.source.as_ref()
    }
}

impl fmt::Debug for ContentFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentFacade")
            .field("backend", &self.backend)
            .field("source", &self.source.name())
            .finish()
    }
}

#[cfg(feature = "sanity-backend")]
fn sanity_source(config: Option<SanityConfig>) -> Result<Arc<dyn ContentSource>, ContentError> {
    let config = config.filter(SanityConfig::is_configured).ok_or_else(|| {
        ContentError::ConfigError(
            "Sanity backend selected but NEXT_PUBLIC_SANITY_PROJECT_ID or NEXT_PUBLIC_SANITY_DATASET is not set"
                .to_string(),
        )
    })?;
    Ok(Arc::new(super::sanity::SanityContentSource::from_config(config)?))
}

#[cfg(not(feature = "sanity-backend"))]
fn sanity_source(_config: Option<SanityConfig>) -> Result<Arc<dyn ContentSource>, ContentError> {
    Err(ContentError::ConfigError(
        "Sanity backend selected but this build lacks the sanity-backend feature".to_string(),
    ))
}
