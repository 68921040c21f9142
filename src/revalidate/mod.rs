//! On-demand revalidation
//!
//! CMS webhooks call the revalidate endpoint after content changes so cached
//! pages are rebuilt right away instead of on the next expiry.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

pub mod cache;

pub use cache::{ContentCache, ContentResource};

/// Path revalidated when the request names none
pub const DEFAULT_PATH: &str = "/";

#[derive(Debug, thiserror::Error)]
pub enum RevalidateError {
    #[error("Failed to revalidate {path}: {reason}")]
    Failed { path: String, reason: String },
}

/// Rebuilds whatever is cached for a path
#[async_trait]
pub trait Revalidator: Send + Sync {
    async fn revalidate(&self, path: &str) -> Result<(), RevalidateError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RevalidateResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revalidated: Option<bool>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevalidateResponse {
    pub status: u16,
    pub body: RevalidateResponseBody,
}

impl RevalidateResponse {
    fn message(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: RevalidateResponseBody {
                revalidated: None,
                message: message.into(),
            },
        }
    }

    fn outcome(status: u16, revalidated: bool, message: impl Into<String>) -> Self {
        Self {
            status,
            body: RevalidateResponseBody {
                revalidated: Some(revalidated),
                message: message.into(),
            },
        }
    }
}

/// Paths named by a webhook body
///
/// - no body, no `paths`, `null` or `""`: `["/"]`
/// - `"/x"`: `["/x"]`
/// - `["/x", "/y"]`: those paths, in order; `[]` names no path at all
///
/// Any other shape, including array entries that are not non-empty strings,
/// is rejected.
pub fn requested_paths(body: &[u8]) -> Result<Vec<String>, InvalidPaths> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(vec![DEFAULT_PATH.to_string()]);
    }
    let paths = serde_json::from_slice::<Value>(body)
        .map_err(|_| InvalidPaths)?
        .get("paths")
        .cloned();

    match paths {
        None | Some(Value::Null) => Ok(vec![DEFAULT_PATH.to_string()]),
        Some(Value::String(path)) if path.is_empty() => Ok(vec![DEFAULT_PATH.to_string()]),
        Some(Value::String(path)) => Ok(vec![path]),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(path) if !path.is_empty() => Ok(path),
                _ => Err(InvalidPaths),
            })
            .collect(),
        Some(_) => Err(InvalidPaths),
    }
}

/// Webhook body whose `paths` is neither a string nor a list of strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("paths must be a string or an array of non-empty strings")]
pub struct InvalidPaths;

pub struct RevalidateHandler {
    secret: Option<String>,
    revalidator: Arc<dyn Revalidator>,
}

impl RevalidateHandler {
    /// `secret` is the shared webhook secret; without one every request is
    /// rejected
    pub fn new(secret: Option<String>, revalidator: Arc<dyn Revalidator>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
            revalidator,
        }
    }

    pub async fn handle(
        &self,
        method: &str,
        query_secret: Option<&str>,
        body: &[u8],
    ) -> RevalidateResponse {
        if !method.eq_ignore_ascii_case("POST") {
            return RevalidateResponse::message(405, "Method not allowed. Use POST.");
        }

        let authorized = match (self.secret.as_deref(), query_secret) {
            (Some(expected), Some(given)) => !given.is_empty() && given == expected,
            _ => false,
        };
        if !authorized {
            warn!("Rejected revalidation request with invalid secret");
            return RevalidateResponse::message(401, "Invalid token");
        }

        let paths = match requested_paths(body) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Rejected revalidation request: {}", e);
                return RevalidateResponse::message(400, "Invalid paths");
            }
        };
        for path in &paths {
            if let Err(e) = self.revalidator.revalidate(path).await {
                error!("Revalidation error: {}", e);
                return RevalidateResponse::outcome(500, false, "Error revalidating");
            }
        }

        info!("Successfully revalidated: {}", paths.join(", "));
        RevalidateResponse::outcome(
            200,
            true,
            format!("Successfully revalidated {} path(s)", paths.len()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRevalidator {
        paths: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl Revalidator for RecordingRevalidator {
        async fn revalidate(&self, path: &str) -> Result<(), RevalidateError> {
            if self.fail_on == Some(path) {
                return Err(RevalidateError::Failed {
                    path: path.to_string(),
                    reason: "render failed".to_string(),
                });
            }
            self.paths.lock().unwrap().push(path.to_string());
            Ok(())
        }
    }

    fn handler(revalidator: Arc<RecordingRevalidator>) -> RevalidateHandler {
        RevalidateHandler::new(Some("s3cret".to_string()), revalidator)
    }

    #[test]
    fn test_requested_paths() {
        assert_eq!(requested_paths(b""), Ok(vec!["/".to_string()]));
        assert_eq!(requested_paths(b"{}"), Ok(vec!["/".to_string()]));
        assert_eq!(requested_paths(br#"{"paths":null}"#), Ok(vec!["/".to_string()]));
        assert_eq!(requested_paths(br#"{"paths":""}"#), Ok(vec!["/".to_string()]));
        assert_eq!(
            requested_paths(br#"{"paths":"/speakers"}"#),
            Ok(vec!["/speakers".to_string()])
        );
        assert_eq!(
            requested_paths(br#"{"paths":["/","/team"]}"#),
            Ok(vec!["/".to_string(), "/team".to_string()])
        );
        assert_eq!(requested_paths(br#"{"paths":[]}"#), Ok(Vec::new()));
    }

    #[test]
    fn test_requested_paths_rejects_other_shapes() {
        assert_eq!(requested_paths(br#"{"paths":[1]}"#), Err(InvalidPaths));
        assert_eq!(requested_paths(br#"{"paths":["/team", ""]}"#), Err(InvalidPaths));
        assert_eq!(requested_paths(br#"{"paths":{"a":"/"}}"#), Err(InvalidPaths));
        assert_eq!(requested_paths(br#"{"paths":5}"#), Err(InvalidPaths));
        assert_eq!(requested_paths(b"{not json"), Err(InvalidPaths));
    }

    #[tokio::test]
    async fn test_path_shapes_through_handler() {
        let revalidator = Arc::new(RecordingRevalidator::default());
        let handler = handler(revalidator.clone());

        let empty = handler
            .handle("POST", Some("s3cret"), br#"{"paths":[]}"#)
            .await;
        assert_eq!(empty.status, 200);
        assert_eq!(empty.body.message, "Successfully revalidated 0 path(s)");
        assert!(revalidator.paths.lock().unwrap().is_empty());

        let invalid = handler
            .handle("POST", Some("s3cret"), br#"{"paths":[1]}"#)
            .await;
        assert_eq!(invalid.status, 400);
        assert_eq!(invalid.body.message, "Invalid paths");
        assert_eq!(invalid.body.revalidated, None);
        assert!(revalidator.paths.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_method_and_secret() {
        let revalidator = Arc::new(RecordingRevalidator::default());
        let handler = handler(revalidator.clone());

        assert_eq!(handler.handle("GET", Some("s3cret"), b"").await.status, 405);
        assert_eq!(handler.handle("POST", None, b"").await.status, 401);
        let wrong = handler.handle("POST", Some("guess"), b"").await;
        assert_eq!(wrong.status, 401);
        assert_eq!(wrong.body.message, "Invalid token");
        assert!(revalidator.paths.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_secret_rejects_all() {
        let revalidator = Arc::new(RecordingRevalidator::default());
        let handler = RevalidateHandler::new(None, revalidator.clone());
        assert_eq!(handler.handle("POST", Some(""), b"").await.status, 401);

        let handler = RevalidateHandler::new(Some(String::new()), revalidator);
        assert_eq!(handler.handle("POST", Some(""), b"").await.status, 401);
    }

    #[tokio::test]
    async fn test_revalidates_paths() {
        let revalidator = Arc::new(RecordingRevalidator::default());
        let handler = handler(revalidator.clone());

        let response = handler
            .handle("POST", Some("s3cret"), br#"{"paths":["/","/speakers"]}"#)
            .await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body.revalidated, Some(true));
        assert_eq!(response.body.message, "Successfully revalidated 2 path(s)");
        assert_eq!(*revalidator.paths.lock().unwrap(), vec!["/", "/speakers"]);

        let response = handler.handle("POST", Some("s3cret"), b"").await;
        assert_eq!(response.body.message, "Successfully revalidated 1 path(s)");
    }

    #[tokio::test]
    async fn test_revalidator_failure() {
        let revalidator = Arc::new(RecordingRevalidator {
            fail_on: Some("/team"),
            ..Default::default()
        });
        let handler = handler(revalidator);

        let response = handler
            .handle("POST", Some("s3cret"), br#"{"paths":"/team"}"#)
            .await;
        assert_eq!(response.status, 500);
        assert_eq!(response.body.revalidated, Some(false));
        assert_eq!(response.body.message, "Error revalidating");
    }
}
