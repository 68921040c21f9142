//! Contact submission handler
//!
//! Transport independent: the server adapts HTTP requests into
//! [`ContactRequest`] and writes [`ContactResponse`] back out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::rate_limit::RateLimitStore;
use super::spam::detect_spam;
use super::submission::{ContactSubmission, SubmissionStatus, SubmissionStore};
use super::validation::{FieldErrors, validate_form};
use super::{ContactConfig, ContactForm};
use crate::models::ContactSectionCopy;

/// Rate limit key used when the client address is unknown
const UNKNOWN_CLIENT: &str = "unknown";

/// Prefix of the rate limit keys that cap stored spam per client
const SPAM_KEY_PREFIX: &str = "spam:";

#[derive(Debug, Clone, Default)]
pub struct ContactRequest {
    pub method: String,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub body: Vec<u8>,
}

impl ContactRequest {
    pub fn post(body: impl Into<Vec<u8>>) -> Self {
        Self {
            method: "POST".to_string(),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ip = Some(ip.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactResponseBody {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactResponse {
    pub status: u16,
    pub body: ContactResponseBody,
}

impl ContactResponse {
    fn success(message: &str) -> Self {
        Self {
            status: 200,
            body: ContactResponseBody {
                success: true,
                message: Some(message.to_string()),
                ..Default::default()
            },
        }
    }

    fn failure(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ContactResponseBody {
                success: false,
                error: Some(error.into()),
                ..Default::default()
            },
        }
    }
}

pub struct ContactHandler {
    config: ContactConfig,
    copy: ContactSectionCopy,
    rate_limits: Arc<dyn RateLimitStore>,
    submissions: Arc<dyn SubmissionStore>,
}

impl ContactHandler {
    pub fn new(
        config: ContactConfig,
        rate_limits: Arc<dyn RateLimitStore>,
        submissions: Arc<dyn SubmissionStore>,
    ) -> Self {
        Self {
            config,
            copy: ContactSectionCopy::default(),
            rate_limits,
            submissions,
        }
    }

    /// Use the site's wording for validation and result messages
    pub fn with_copy(mut self, copy: ContactSectionCopy) -> Self {
        self.copy = copy;
        self
    }

    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    pub async fn handle(&self, request: ContactRequest) -> ContactResponse {
        self.handle_at(request, Utc::now()).await
    }

    /// Handle `request` as if it arrived at `now`
    pub async fn handle_at(&self, request: ContactRequest, now: DateTime<Utc>) -> ContactResponse {
        if !request.method.eq_ignore_ascii_case("POST") {
            return ContactResponse::failure(
                405,
                "Method not allowed. Only POST requests are accepted.",
            );
        }

        let form: ContactForm = match serde_json::from_slice(&request.body) {
            Ok(form) => form,
            Err(e) => {
                warn!("Rejected contact request with malformed body: {}", e);
                return ContactResponse::failure(400, "Invalid request body.");
            }
        };
        let form = form.trimmed();
        let client = request.client_ip.as_deref().unwrap_or(UNKNOWN_CLIENT);

        // Spam gets the success answer either way. Only the first few records
        // per client and window are kept.
        if let Some(signal) = detect_spam(&form, now.timestamp_millis(), self.config.min_fill_ms) {
            warn!("Spam signal from {}: {}", client, signal);
            let spam_key = format!("{}{}", SPAM_KEY_PREFIX, client);
            if self.rate_limits.check_and_record(&spam_key, now).await {
                let record = self.record(&form, SubmissionStatus::Spam, now, &request);
                if let Err(e) = self.submissions.store(&record).await {
                    error!("Failed to store spam submission from {}: {}", client, e);
                }
            } else {
                debug!("Dropping spam from {}, over the record limit", client);
            }
            return ContactResponse::success(&self.copy.messages.success);
        }

        if !self.rate_limits.check_and_record(client, now).await {
            warn!("Rate limit exceeded for {}", client);
            return ContactResponse::failure(429, self.copy.messages.rate_limit_error.clone());
        }

        let errors = validate_form(&form, &self.copy);
        if let Some(first) = errors.values().next() {
            let mut response = ContactResponse::failure(400, first.clone());
            response.body.fields = Some(errors);
            return response;
        }

        let record = self.record(&form, SubmissionStatus::New, now, &request);
        match self.submissions.store(&record).await {
            Ok(id) => {
                info!("Stored contact submission {} from {}", id, client);
                ContactResponse::success(&self.copy.messages.success)
            }
            Err(e) => {
                error!("Failed to store contact submission from {}: {}", client, e);
                ContactResponse::failure(500, self.copy.messages.error.clone())
            }
        }
    }

    fn record(
        &self,
        form: &ContactForm,
        status: SubmissionStatus,
        now: DateTime<Utc>,
        request: &ContactRequest,
    ) -> ContactSubmission {
        ContactSubmission::from_form(
            form,
            status,
            now,
            request.client_ip.clone(),
            request.user_agent.clone(),
        )
    }
}
