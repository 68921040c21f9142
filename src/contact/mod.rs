//! Contact form pipeline
//!
//! A submission passes through, in order: method check, body decoding, spam
//! heuristics ([`spam`]), the per-IP rate limit ([`rate_limit`]), field
//! validation ([`validation`]) and finally persistence ([`submission`]).
//! [`ContactHandler`] wires the steps together.

use serde::{Deserialize, Serialize};

pub mod handler;
pub mod rate_limit;
pub mod spam;
pub mod submission;
pub mod validation;

pub use handler::{ContactHandler, ContactRequest, ContactResponse, ContactResponseBody};
#[cfg(feature = "server")]
pub use rate_limit::spawn_prune_task;
pub use rate_limit::{InMemoryRateLimitStore, RateLimitStore};
#[cfg(feature = "sanity-backend")]
pub use submission::SanitySubmissionStore;
pub use submission::{
    ContactSubmission, InMemorySubmissionStore, SubmissionError, SubmissionStatus,
    SubmissionStore,
};
pub use spam::{SpamSignal, detect_spam};
pub use validation::{ContactField, ContactFormState, FieldErrors, is_valid_email, validate_form};

/// Contact form payload as posted by the site
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default)]
    pub message: String,
    /// Hidden field; humans leave it empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honeypot: Option<String>,
    /// Milliseconds since the Unix epoch at which the form was rendered
    #[serde(
        default,
        rename = "_formStartTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub form_start_time: Option<i64>,
}

impl ContactForm {
    /// Copy with every text field trimmed and a blank company dropped
    pub fn trimmed(&self) -> ContactForm {
        ContactForm {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: self
                .company
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            message: self.message.trim().to_string(),
            honeypot: self.honeypot.clone(),
            form_start_time: self.form_start_time,
        }
    }
}

/// Tunables of the contact pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactConfig {
    /// Accepted submissions per client IP within `window_secs`
    pub max_requests: u32,
    pub window_secs: u64,
    /// Submissions sent sooner than this after the form rendered are spam
    pub min_fill_ms: i64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            max_requests: rate_limit::DEFAULT_MAX_REQUESTS,
            window_secs: rate_limit::DEFAULT_WINDOW_SECS,
            min_fill_ms: spam::MIN_FILL_TIME_MS,
        }
    }
}

impl ContactConfig {
    pub fn with_max_requests(mut self, max_requests: u32) -> Self {
        self.max_requests = max_requests;
        self
    }

    pub fn with_window_secs(mut self, window_secs: u64) -> Self {
        self.window_secs = window_secs;
        self
    }

    pub fn with_min_fill_ms(mut self, min_fill_ms: i64) -> Self {
        self.min_fill_ms = min_fill_ms;
        self
    }

    /// Rate limit store sized by this config
    pub fn rate_limit_store(&self) -> InMemoryRateLimitStore {
        InMemoryRateLimitStore::new(
            self.max_requests,
            std::time::Duration::from_secs(self.window_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_wire_names() {
        let form: ContactForm = serde_json::from_str(
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","message":"Hi","honeypot":"","_formStartTime":1700000000000}"#,
        )
        .unwrap();
        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.company, None);
        assert_eq!(form.honeypot.as_deref(), Some(""));
        assert_eq!(form.form_start_time, Some(1_700_000_000_000));
    }

    #[test]
    fn test_missing_fields_decode_empty() {
        let form: ContactForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form, ContactForm::default());
    }

    #[test]
    fn test_trimmed() {
        let form = ContactForm {
            first_name: "  Ada ".to_string(),
            company: Some("   ".to_string()),
            message: "\nHello\n".to_string(),
            ..Default::default()
        };
        let trimmed = form.trimmed();
        assert_eq!(trimmed.first_name, "Ada");
        assert_eq!(trimmed.company, None);
        assert_eq!(trimmed.message, "Hello");
    }

    #[test]
    fn test_config_defaults() {
        let config = ContactConfig::default();
        assert_eq!(config.max_requests, 3);
        assert_eq!(config.window_secs, 3600);
        assert_eq!(config.min_fill_ms, 3000);

        let config = config.with_max_requests(10).with_min_fill_ms(0);
        assert_eq!(config.max_requests, 10);
        assert_eq!(config.min_fill_ms, 0);
    }
}
