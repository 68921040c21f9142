//! Summit Content - content access layer for the Coin Nations summit site
//!
//! Provides:
//! - Canonical content models (settings, people, companies, home page)
//! - Two interchangeable content sources: bundled static data and Sanity CMS,
//!   selected once at startup through [`content::ContentFacade`]
//! - The contact form pipeline: validation, spam heuristics, per-IP rate
//!   limiting and persistence
//! - On-demand revalidation of cached content
//! - An HTTP server exposing all of the above (feature `server`)

pub mod contact;
pub mod content;
pub mod data;
pub mod models;
pub mod revalidate;

#[cfg(feature = "server")]
pub mod cli;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use content::{
    ContentBackend, ContentError, ContentFacade, ContentSource, SanityConfig,
    SanityContentSource, StaticContentSource,
};
#[cfg(feature = "sanity-backend")]
pub use content::SanityClient;

pub use contact::{
    ContactConfig, ContactForm, ContactHandler, ContactRequest, ContactResponse,
    ContactSubmission, InMemoryRateLimitStore, InMemorySubmissionStore, RateLimitStore,
    SubmissionStatus, SubmissionStore,
};
pub use revalidate::{ContentCache, RevalidateHandler, Revalidator};

// Re-export models
pub use models::{
    Company, CompanyTier, HomePage, ImageAsset, NavigationLink, Person, PersonType,
    SiteSettings,
};
