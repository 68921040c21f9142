//! Persistence of contact submissions

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::ContactForm;
use crate::content::ContentError;

/// Sanity document type of stored submissions
pub const SUBMISSION_DOCUMENT_TYPE: &str = "contactSubmission";

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ContentError> for SubmissionError {
    fn from(err: ContentError) -> Self {
        SubmissionError::StorageError(err.to_string())
    }
}

/// Triage state of a submission. Only `new` and `spam` are set on intake.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    New,
    Read,
    Replied,
    Spam,
    Archived,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Read => "read",
            SubmissionStatus::Replied => "replied",
            SubmissionStatus::Spam => "spam",
            SubmissionStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub message: String,
    /// Serialized as RFC 3339
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub status: SubmissionStatus,
    /// Internal notes added while triaging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ContactSubmission {
    /// Build a record from a (trimmed) form
    pub fn from_form(
        form: &ContactForm,
        status: SubmissionStatus,
        submitted_at: DateTime<Utc>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            company: form.company.clone(),
            message: form.message.clone(),
            submitted_at,
            ip_address,
            user_agent,
            status,
            notes: None,
        }
    }

    /// CMS document for this submission
    pub fn to_document(&self, id: &str) -> Result<Value, SubmissionError> {
        let mut document = serde_json::to_value(self)
            .map_err(|e| SubmissionError::SerializationError(e.to_string()))?;
        if let Value::Object(ref mut fields) = document {
            fields.insert("_id".to_string(), Value::String(id.to_string()));
            fields.insert(
                "_type".to_string(),
                Value::String(SUBMISSION_DOCUMENT_TYPE.to_string()),
            );
        }
        Ok(document)
    }
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist `submission`, returning the id it was stored under
    async fn store(&self, submission: &ContactSubmission) -> Result<String, SubmissionError>;
}

/// Submissions kept by [`InMemorySubmissionStore::new`]
pub const DEFAULT_IN_MEMORY_CAPACITY: usize = 1000;

/// Keeps the most recent submissions in process memory; the oldest are
/// dropped once `capacity` is reached
#[derive(Debug)]
pub struct InMemorySubmissionStore {
    submissions: Mutex<VecDeque<(String, ContactSubmission)>>,
    capacity: usize,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_IN_MEMORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            submissions: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Stored submissions, oldest first
    pub fn submissions(&self) -> Vec<ContactSubmission> {
        self.submissions
            .lock()
            .map(|stored| stored.iter().map(|(_, s)| s.clone()).collect())
            .unwrap_or_default()
    }

    pub fn count_with_status(&self, status: SubmissionStatus) -> usize {
        self.submissions().iter().filter(|s| s.status == status).count()
    }
}

impl Default for InMemorySubmissionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn store(&self, submission: &ContactSubmission) -> Result<String, SubmissionError> {
        let id = Uuid::new_v4().to_string();
        let mut stored = self
            .submissions
            .lock()
            .map_err(|e| SubmissionError::StorageError(format!("Submission store poisoned: {}", e)))?;
        while stored.len() >= self.capacity {
            stored.pop_front();
        }
        stored.push_back((id.clone(), submission.clone()));
        Ok(id)
    }
}

/// Creates `contactSubmission` documents in a Sanity dataset. The client
/// needs a write token.
#[cfg(feature = "sanity-backend")]
pub struct SanitySubmissionStore<C: crate::content::GroqClient> {
    client: C,
}

#[cfg(feature = "sanity-backend")]
impl<C: crate::content::GroqClient> SanitySubmissionStore<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[cfg(feature = "sanity-backend")]
#[async_trait]
impl<C: crate::content::GroqClient> SubmissionStore for SanitySubmissionStore<C> {
    async fn store(&self, submission: &ContactSubmission) -> Result<String, SubmissionError> {
        let id = Uuid::new_v4().to_string();
        let document = submission.to_document(&id)?;
        self.client
            .mutate(vec![serde_json::json!({ "create": document })])
            .await?;
        tracing::info!("Stored {} submission {}", submission.status, id);
        Ok(id)
    }
}
