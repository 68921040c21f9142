//! End-to-end tests for the contact submission pipeline

use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};
use std::sync::Arc;
use summit_content::contact::{
    ContactConfig, ContactField, ContactFormState, ContactHandler, ContactRequest,
    InMemoryRateLimitStore, InMemorySubmissionStore, SubmissionStatus,
};
use summit_content::content::StaticContentSource;

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_760_000_000_000).unwrap()
}

fn form(started_ms_ago: i64, extra: Value) -> Vec<u8> {
    let mut form = json!({
        "firstName": "Grace",
        "lastName": "Hopper",
        "email": "grace@example.com",
        "company": "Navy",
        "message": "Interested in sponsoring",
        "_formStartTime": now().timestamp_millis() - started_ms_ago
    });
    if let (Some(target), Some(extra)) = (form.as_object_mut(), extra.as_object()) {
        target.extend(extra.clone());
    }
    form.to_string().into_bytes()
}

fn pipeline(config: ContactConfig) -> (ContactHandler, Arc<InMemorySubmissionStore>) {
    let copy = StaticContentSource::new().unwrap().site_settings().contact_copy();
    let submissions = Arc::new(InMemorySubmissionStore::new());
    let handler = ContactHandler::new(
        config.clone(),
        Arc::new(config.rate_limit_store()),
        submissions.clone(),
    )
    .with_copy(copy);
    (handler, submissions)
}

mod spam_tests {
    use super::*;

    #[tokio::test]
    async fn test_filled_honeypot_never_stored_as_new() {
        let (handler, submissions) = pipeline(ContactConfig::default());
        let spam = ContactRequest::post(form(60_000, json!({ "honeypot": "spammy" })))
            .with_client_ip("203.0.113.9");

        let response = handler.handle_at(spam, now()).await;

        assert_eq!(response.status, 200);
        assert!(response.body.success);
        assert_eq!(submissions.count_with_status(SubmissionStatus::New), 0);
        assert_eq!(submissions.count_with_status(SubmissionStatus::Spam), 1);
    }

    #[tokio::test]
    async fn test_instant_submission_looks_like_success() {
        let (handler, submissions) = pipeline(ContactConfig::default());
        let human = handler
            .handle_at(ContactRequest::post(form(60_000, json!({}))), now())
            .await;
        let bot = handler
            .handle_at(ContactRequest::post(form(0, json!({}))), now())
            .await;

        assert_eq!(bot.status, human.status);
        assert_eq!(bot.body, human.body);
        assert_eq!(submissions.count_with_status(SubmissionStatus::Spam), 1);
    }

    #[tokio::test]
    async fn test_honeypot_flood_from_one_client() {
        let (handler, submissions) = pipeline(ContactConfig::default());
        for _ in 0..1000 {
            let spam = ContactRequest::post(form(60_000, json!({ "honeypot": "x" })))
                .with_client_ip("198.51.100.66");
            assert_eq!(handler.handle_at(spam, now()).await.status, 200);
        }

        assert_eq!(submissions.count_with_status(SubmissionStatus::Spam), 3);
        assert_eq!(submissions.count_with_status(SubmissionStatus::New), 0);
    }

    #[tokio::test]
    async fn test_configured_fill_time() {
        let (handler, submissions) = pipeline(ContactConfig::default().with_min_fill_ms(10_000));
        let response = handler
            .handle_at(ContactRequest::post(form(5_000, json!({}))), now())
            .await;

        assert_eq!(response.status, 200);
        assert_eq!(submissions.count_with_status(SubmissionStatus::Spam), 1);
    }
}

mod rate_limit_tests {
    use super::*;

    #[tokio::test]
    async fn test_fourth_request_in_window_rejected() {
        let (handler, submissions) = pipeline(ContactConfig::default());
        for minute in 0..3 {
            let request = ContactRequest::post(form(60_000, json!({}))).with_client_ip("192.0.2.1");
            let response = handler
                .handle_at(request, now() + Duration::minutes(minute))
                .await;
            assert_eq!(response.status, 200);
        }

        let request = ContactRequest::post(form(60_000, json!({}))).with_client_ip("192.0.2.1");
        let response = handler
            .handle_at(request, now() + Duration::minutes(10))
            .await;
        assert_eq!(response.status, 429);
        assert!(!response.body.success);
        assert_eq!(submissions.count_with_status(SubmissionStatus::New), 3);

        let other = ContactRequest::post(form(60_000, json!({}))).with_client_ip("192.0.2.2");
        assert_eq!(handler.handle_at(other, now()).await.status, 200);
    }

    #[tokio::test]
    async fn test_limit_lifts_after_window() {
        let config = ContactConfig::default().with_max_requests(1).with_window_secs(60);
        let (handler, _) = pipeline(config);
        let send = || ContactRequest::post(form(60_000, json!({}))).with_client_ip("192.0.2.3");

        assert_eq!(handler.handle_at(send(), now()).await.status, 200);
        assert_eq!(handler.handle_at(send(), now()).await.status, 429);
        assert_eq!(
            handler
                .handle_at(send(), now() + Duration::seconds(61))
                .await
                .status,
            200
        );
    }
}

mod validation_tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_email_reports_field() {
        let (handler, submissions) = pipeline(ContactConfig::default());
        let response = handler
            .handle_at(
                ContactRequest::post(form(60_000, json!({ "email": "grace@navy" }))),
                now(),
            )
            .await;

        assert_eq!(response.status, 400);
        let fields = response.body.fields.unwrap();
        assert!(fields.contains_key(&ContactField::Email));
        assert_eq!(fields.len(), 1);
        assert!(submissions.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_stored_submission_is_trimmed() {
        let (handler, submissions) = pipeline(ContactConfig::default());
        let request = ContactRequest::post(form(
            60_000,
            json!({ "firstName": "  Grace  ", "company": "   " }),
        ))
        .with_client_ip("192.0.2.8")
        .with_user_agent("Mozilla/5.0");

        assert_eq!(handler.handle_at(request, now()).await.status, 200);

        let stored = &submissions.submissions()[0];
        assert_eq!(stored.first_name, "Grace");
        assert_eq!(stored.company, None);
        assert_eq!(stored.ip_address.as_deref(), Some("192.0.2.8"));
        assert_eq!(stored.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(stored.submitted_at, now());
    }

    #[tokio::test]
    async fn test_non_post_rejected() {
        let (handler, _) = pipeline(ContactConfig::default());
        let request = ContactRequest {
            method: "GET".to_string(),
            ..Default::default()
        };
        assert_eq!(handler.handle_at(request, now()).await.status, 405);
    }
}

mod form_state_tests {
    use super::*;

    #[test]
    fn test_submit_then_resubmit() {
        let copy = StaticContentSource::new().unwrap().site_settings().contact_copy();
        let started = now().timestamp_millis();
        let mut state = ContactFormState::new(started);

        let errors = state.submit(&copy).unwrap_err();
        assert!(errors.contains_key(&ContactField::FirstName));
        assert!(errors.contains_key(&ContactField::Message));

        state.set_field(ContactField::FirstName, "Grace");
        assert!(state.error(ContactField::FirstName).is_none());
        state.set_field(ContactField::LastName, "Hopper");
        state.set_field(ContactField::Email, "grace@example.com");
        state.set_field(ContactField::Message, "Hello");

        let submitted = state.submit(&copy).unwrap();
        assert_eq!(submitted.first_name, "Grace");
        assert_eq!(submitted.form_start_time, Some(started));
        assert!(state.form().first_name.is_empty());
        assert!(state.errors().is_empty());
    }
}
