//! HTTP surface
//!
//! JSON content API, the contact endpoint and the revalidation webhook on a
//! hyper http1 server. All handlers share one [`AppState`].

use std::sync::Arc;

use tracing::warn;

use crate::config::Args;
use crate::contact::{
    ContactHandler, InMemorySubmissionStore, RateLimitStore, SubmissionStore,
};
use crate::content::{ContentBackend, ContentError, ContentFacade};
use crate::revalidate::{ContentCache, RevalidateHandler};

pub mod http;

/// Shared application state
pub struct AppState {
    pub config: Args,
    /// Content source picked at startup
    pub content: ContentFacade,
    pub contact: ContactHandler,
    pub revalidate: RevalidateHandler,
    /// JSON snapshots served by the content API
    pub cache: Arc<ContentCache>,
    pub rate_limits: Arc<dyn RateLimitStore>,
}

impl AppState {
    pub fn new(
        config: Args,
        content: ContentFacade,
        submissions: Arc<dyn SubmissionStore>,
    ) -> Self {
        let contact_config = config.contact_config();
        let rate_limits: Arc<dyn RateLimitStore> = Arc::new(contact_config.rate_limit_store());
        let cache = Arc::new(ContentCache::new(content.clone()));

        Self {
            contact: ContactHandler::new(contact_config, Arc::clone(&rate_limits), submissions),
            revalidate: RevalidateHandler::new(config.revalidate_secret.clone(), cache.clone()),
            config,
            content,
            cache,
            rate_limits,
        }
    }

    /// Build the content source and submission store described by `args`
    ///
    /// The contact form wording comes from the site settings; when those
    /// cannot be loaded the defaults are used.
    pub async fn from_args(args: Args) -> Result<Self, ContentError> {
        let content = ContentFacade::new(args.backend(), args.sanity_config())?;
        let submissions = submission_store(&args)?;

        let mut state = Self::new(args, content, submissions);
        match state.content.site_settings().await {
            Ok(settings) => state.contact = state.contact.with_copy(settings.contact_copy()),
            Err(e) => warn!("Using default contact form copy: {}", e),
        }

        if state.revalidate_disabled() {
            warn!("SANITY_REVALIDATE_SECRET is not set, revalidation requests will be rejected");
        }
        Ok(state)
    }

    fn revalidate_disabled(&self) -> bool {
        self.config
            .revalidate_secret
            .as_deref()
            .is_none_or(str::is_empty)
    }
}

/// Submissions go to the CMS when the Sanity backend has a write token
#[cfg(feature = "sanity-backend")]
fn submission_store(args: &Args) -> Result<Arc<dyn SubmissionStore>, ContentError> {
    use crate::contact::SanitySubmissionStore;
    use crate::content::SanityClient;

    match args.sanity_config() {
        Some(config) if args.backend() == ContentBackend::Sanity && config.token.is_some() => {
            tracing::info!("Contact submissions are stored in Sanity");
            Ok(Arc::new(SanitySubmissionStore::new(SanityClient::new(config)?)))
        }
        _ => {
            warn!("Contact submissions are kept in memory only");
            Ok(Arc::new(InMemorySubmissionStore::new()))
        }
    }
}

#[cfg(not(feature = "sanity-backend"))]
fn submission_store(args: &Args) -> Result<Arc<dyn SubmissionStore>, ContentError> {
    if args.backend() == ContentBackend::Sanity {
        return Err(ContentError::ConfigError(
            "Sanity backend selected but this build lacks the sanity-backend feature".to_string(),
        ));
    }
    warn!("Contact submissions are kept in memory only");
    Ok(Arc::new(InMemorySubmissionStore::new()))
}
