//! Content access layer
//!
//! Defines the [`ContentSource`] trait and its implementations:
//! - [`StaticContentSource`]: bundled data, no network I/O
//! - [`SanityContentSource`]: Sanity CMS over HTTP
//!
//! [`ContentFacade`] picks one of them once, at startup, and hands the same
//! instance to every consumer.

use async_trait::async_trait;

use crate::models::{
    CallToAction, Company, CompanyLogo, HomePage, LegacyPerson, NavigationLink, Person,
    SiteSettings, person_to_legacy,
};

pub mod client;
pub mod facade;
pub mod queries;
pub mod sanity;
pub mod static_source;

pub use client::{GroqClient, Perspective, SanityConfig};
#[cfg(feature = "sanity-backend")]
pub use client::SanityClient;
pub use facade::{ContentBackend, ContentFacade, USE_SANITY_ENV};
pub use sanity::{DocumentCounts, SanityContentSource};
pub use static_source::StaticContentSource;

/// Number of speakers highlighted ahead of the full grid
pub const FEATURED_SPEAKER_COUNT: usize = 6;

/// Error type for content operations
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A singleton document (`siteSettings`, `homePage`) is absent. This is a
    /// configuration problem of the dataset and is never retried.
    #[error("Required document not found: {0}")]
    MissingDocument(&'static str),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Content backend error: {0}")]
    BackendError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Trait for content sources
///
/// Every implementation produces the same canonical shapes. The provided
/// methods derive their result from the required ones; sources override them
/// where they have a more direct answer.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short name of the source, for logs
    fn name(&self) -> &'static str;

    /// Site-wide settings singleton
    async fn site_settings(&self) -> Result<SiteSettings, ContentError>;

    /// Complete home page view model
    async fn home_page(&self) -> Result<HomePage, ContentError>;

    /// All speakers, ordered by `order` ascending
    async fn all_speakers(&self) -> Result<Vec<Person>, ContentError>;

    /// All team members, ordered by `order` ascending
    async fn all_team_members(&self) -> Result<Vec<Person>, ContentError>;

    /// Platinum, gold and silver companies, ordered by `order` ascending
    async fn all_partners(&self) -> Result<Vec<Company>, ContentError>;

    /// Supporter companies, ordered by `order` ascending
    async fn all_supporters(&self) -> Result<Vec<Company>, ContentError>;

    async fn primary_cta(&self) -> Result<CallToAction, ContentError> {
        Ok(self.site_settings().await?.primary_cta)
    }

    async fn navigation_links(&self) -> Result<Vec<NavigationLink>, ContentError> {
        Ok(self.site_settings().await?.navigation)
    }

    async fn featured_speakers(&self) -> Result<Vec<Person>, ContentError> {
        let mut speakers = self.all_speakers().await?;
        speakers.truncate(FEATURED_SPEAKER_COUNT);
        Ok(speakers)
    }

    async fn speaker_by_id(&self, id: &str) -> Result<Option<Person>, ContentError> {
        Ok(self
            .all_speakers()
            .await?
            .into_iter()
            .find(|speaker| speaker.id == id))
    }

    /// Partner logos shown in the hero strip
    async fn featured_partners(&self) -> Result<Vec<CompanyLogo>, ContentError> {
        Ok(self.home_page().await?.hero.featured_partners)
    }

    /// Speakers in the flat pre-CMS record shape
    async fn legacy_speakers_data(&self) -> Result<Vec<LegacyPerson>, ContentError> {
        Ok(self.all_speakers().await?.iter().map(person_to_legacy).collect())
    }

    /// Team members in the flat pre-CMS record shape
    async fn legacy_team_data(&self) -> Result<Vec<LegacyPerson>, ContentError> {
        Ok(self
            .all_team_members()
            .await?
            .iter()
            .map(person_to_legacy)
            .collect())
    }

    async fn partner_logo_urls(&self) -> Result<Vec<String>, ContentError> {
        Ok(logo_urls(self.all_partners().await?))
    }

    async fn supporter_logo_urls(&self) -> Result<Vec<String>, ContentError> {
        Ok(logo_urls(self.all_supporters().await?))
    }
}

fn logo_urls(companies: Vec<Company>) -> Vec<String> {
    companies
        .into_iter()
        .map(|company| company.logo.src)
        .filter(|src| !src.is_empty())
        .collect()
}
