//! Sanity HTTP API client
//!
//! [`GroqClient`] is the seam between the CMS adapter and the network. The
//! reqwest-backed [`SanityClient`] is only compiled with the `sanity-backend`
//! feature; tests use in-memory implementations of the trait.
//!
//! ## Security
//!
//! Project id and dataset end up in the request host and path, so both are
//! validated. Only alphanumeric characters, hyphens, and underscores are allowed.

use super::ContentError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum allowed length for project ids and dataset names
const MAX_SLUG_LENGTH: usize = 100;

/// API version pinned by the site
pub const DEFAULT_API_VERSION: &str = "2024-01-25";

/// Which document revisions a query sees
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Perspective {
    /// Published documents only
    #[default]
    Published,
    /// Drafts layered over published documents. Needs a token.
    PreviewDrafts,
}

impl Perspective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Perspective::Published => "published",
            Perspective::PreviewDrafts => "previewDrafts",
        }
    }
}

/// Connection settings for a Sanity project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// API token. Required for mutations and draft previews.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Read through the API CDN. Off unless asked for: CDN reads can lag
    /// behind a publish by several seconds.
    pub use_cdn: bool,
    pub perspective: Perspective,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token: None,
            use_cdn: false,
            perspective: Perspective::Published,
        }
    }
}

impl SanityConfig {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_cdn(mut self, use_cdn: bool) -> Self {
        self.use_cdn = use_cdn;
        self
    }

    pub fn with_perspective(mut self, perspective: Perspective) -> Self {
        self.perspective = perspective;
        self
    }

    /// Whether project id and dataset are both set
    pub fn is_configured(&self) -> bool {
        !self.project_id.trim().is_empty() && !self.dataset.trim().is_empty()
    }

    /// Check that the config can be turned into request URLs
    pub fn validate(&self) -> Result<(), ContentError> {
        validate_slug("Project id", &self.project_id)?;
        validate_slug("Dataset", &self.dataset)?;
        if self.api_version().is_empty() {
            return Err(ContentError::ConfigError(
                "API version cannot be empty".to_string(),
            ));
        }
        if self.perspective == Perspective::PreviewDrafts && self.token.is_none() {
            return Err(ContentError::ConfigError(
                "The previewDrafts perspective requires an API token".to_string(),
            ));
        }
        Ok(())
    }

    /// Only unauthenticated reads that opted in go through the CDN
    pub fn uses_cdn(&self) -> bool {
        self.use_cdn && self.token.is_none()
    }

    fn api_version(&self) -> &str {
        let version = self.api_version.trim();
        version.strip_prefix('v').unwrap_or(version)
    }

    fn base_url(&self, cdn: bool) -> String {
        format!(
            "https://{}.{}.sanity.io/v{}",
            self.project_id,
            if cdn { "apicdn" } else { "api" },
            self.api_version()
        )
    }

    /// Query endpoint without the query string
    pub fn query_endpoint(&self) -> String {
        format!("{}/data/query/{}", self.base_url(self.uses_cdn()), self.dataset)
    }

    /// Mutation endpoint; mutations never go through the CDN
    pub fn mutate_url(&self) -> String {
        format!("{}/data/mutate/{}", self.base_url(false), self.dataset)
    }
}

fn validate_slug(label: &str, value: &str) -> Result<(), ContentError> {
    if value.is_empty() {
        return Err(ContentError::ConfigError(format!("{} cannot be empty", label)));
    }

    if value.len() > MAX_SLUG_LENGTH {
        return Err(ContentError::ConfigError(format!(
            "{} too long (max {} characters)",
            label, MAX_SLUG_LENGTH
        )));
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ContentError::ConfigError(format!(
            "{} contains invalid characters. Only alphanumeric, hyphens, and underscores are allowed.",
            label
        )));
    }

    Ok(())
}

/// Executes GROQ queries and mutations against a dataset
#[async_trait]
pub trait GroqClient: Send + Sync {
    /// Run `query` with the given `$name` parameters and return the `result`
    /// member of the response (`Value::Null` when the query matched nothing)
    async fn fetch(&self, query: &str, params: &[(&str, Value)]) -> Result<Value, ContentError>;

    /// Apply a batch of mutations in one transaction
    async fn mutate(&self, mutations: Vec<Value>) -> Result<Value, ContentError>;
}

/// reqwest-backed [`GroqClient`]
#[cfg(feature = "sanity-backend")]
pub struct SanityClient {
    config: SanityConfig,
    client: reqwest::Client,
}

#[cfg(feature = "sanity-backend")]
impl SanityClient {
    /// Create a client for a validated config
    ///
    /// # Example
    ///
    /// ```rust
    /// use summit_content::content::{SanityClient, SanityConfig};
    ///
    /// let client = SanityClient::new(SanityConfig::new("abc123", "production")).unwrap();
    /// assert!(!client.config().uses_cdn());
    /// ```
    pub fn new(config: SanityConfig) -> Result<Self, ContentError> {
        config.validate()?;
        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    pub fn config(&self) -> &SanityConfig {
        &self.config
    }

    /// Full query URL: the GROQ text, the perspective, and each parameter as
    /// a JSON-encoded `$name` pair
    pub fn query_url(&self, query: &str, params: &[(&str, Value)]) -> String {
        let mut url = format!(
            "{}?query={}&perspective={}",
            self.config.query_endpoint(),
            urlencoding::encode(query),
            self.config.perspective.as_str()
        );
        for (name, value) in params {
            url.push_str(&format!(
                "&%24{}={}",
                urlencoding::encode(name.trim_start_matches('$')),
                urlencoding::encode(&value.to_string())
            ));
        }
        url
    }

    /// Build a request with authentication headers
    fn build_request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.request(method, url);

        if let Some(ref token) = self.config.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        request
    }

    async fn read_response(
        response: reqwest::Response,
        action: &str,
    ) -> Result<Value, ContentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::BackendError(format!(
                "{} failed: {} {}",
                action, status, body
            )));
        }

        response.json().await.map_err(|e| {
            ContentError::SerializationError(format!("Failed to parse {} response: {}", action, e))
        })
    }
}

#[cfg(feature = "sanity-backend")]
#[async_trait]
impl GroqClient for SanityClient {
    async fn fetch(&self, query: &str, params: &[(&str, Value)]) -> Result<Value, ContentError> {
        let url = self.query_url(query, params);
        let response = self
            .build_request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(|e| ContentError::NetworkError(format!("Failed to run query: {}", e)))?;

        let mut body = Self::read_response(response, "Query").await?;
        Ok(body
            .get_mut("result")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    async fn mutate(&self, mutations: Vec<Value>) -> Result<Value, ContentError> {
        if self.config.token.is_none() {
            return Err(ContentError::ConfigError(
                "Mutations require an API token".to_string(),
            ));
        }

        let response = self
            .build_request(reqwest::Method::POST, &self.config.mutate_url())
            .json(&serde_json::json!({ "mutations": mutations }))
            .send()
            .await
            .map_err(|e| ContentError::NetworkError(format!("Failed to send mutation: {}", e)))?;

        Self::read_response(response, "Mutation").await
    }
}
