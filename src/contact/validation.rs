//! Contact form field validation
//!
//! Shared by the server handler and [`ContactFormState`], the model of the
//! form on the page, so both reject the same input with the same wording.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ContactForm;
use crate::models::ContactSectionCopy;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_COMPANY_LENGTH: usize = 200;
pub const MAX_MESSAGE_LENGTH: usize = 5000;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Form fields that carry user input
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Company,
    Message,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::FirstName => "firstName",
            ContactField::LastName => "lastName",
            ContactField::Email => "email",
            ContactField::Company => "company",
            ContactField::Message => "message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error message per invalid field, in form order
pub type FieldErrors = BTreeMap<ContactField, String>;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validate `form`, using the wording configured in `copy`
///
/// Values are checked after trimming; lengths count characters, not bytes.
pub fn validate_form(form: &ContactForm, copy: &ContactSectionCopy) -> FieldErrors {
    let messages = &copy.validation_messages;
    let labels = &copy.field_labels;
    let mut errors = FieldErrors::new();

    let mut require = |field: ContactField, value: &str, missing: &str, label: &str, max: usize| {
        let value = value.trim();
        if value.is_empty() {
            errors.insert(field, missing.to_string());
        } else if value.chars().count() > max {
            errors.insert(field, too_long(label, max));
        }
    };

    require(
        ContactField::FirstName,
        &form.first_name,
        &messages.first_name_required,
        &labels.first_name,
        MAX_NAME_LENGTH,
    );
    require(
        ContactField::LastName,
        &form.last_name,
        &messages.last_name_required,
        &labels.last_name,
        MAX_NAME_LENGTH,
    );
    require(
        ContactField::Email,
        &form.email,
        &messages.email_required,
        &labels.email,
        MAX_EMAIL_LENGTH,
    );
    require(
        ContactField::Message,
        &form.message,
        &messages.message_required,
        &labels.message,
        MAX_MESSAGE_LENGTH,
    );

    let email = form.email.trim();
    if !email.is_empty() && !errors.contains_key(&ContactField::Email) && !is_valid_email(email) {
        errors.insert(ContactField::Email, messages.email_invalid.clone());
    }

    if let Some(company) = form.company.as_deref() {
        if company.trim().chars().count() > MAX_COMPANY_LENGTH {
            errors.insert(
                ContactField::Company,
                too_long(&labels.company, MAX_COMPANY_LENGTH),
            );
        }
    }

    errors
}

fn too_long(label: &str, max: usize) -> String {
    format!("{} must be at most {} characters", label, max)
}

/// State of the contact form on the page
///
/// Editing a field clears its error. [`ContactFormState::submit`] blocks until
/// the form is valid, then hands back the trimmed values and resets the inputs.
#[derive(Debug, Clone, Default)]
pub struct ContactFormState {
    form: ContactForm,
    errors: FieldErrors,
}

impl ContactFormState {
    /// Fresh form rendered at `started_at_ms` (Unix epoch milliseconds)
    pub fn new(started_at_ms: i64) -> Self {
        Self {
            form: ContactForm {
                form_start_time: Some(started_at_ms),
                ..Default::default()
            },
            errors: FieldErrors::new(),
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: ContactField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::FirstName => self.form.first_name = value,
            ContactField::LastName => self.form.last_name = value,
            ContactField::Email => self.form.email = value,
            ContactField::Company => self.form.company = Some(value),
            ContactField::Message => self.form.message = value,
        }
        self.errors.remove(&field);
    }

    pub fn set_honeypot(&mut self, value: impl Into<String>) {
        self.form.honeypot = Some(value.into());
    }

    /// Validate and, when valid, return the payload to post
    pub fn submit(&mut self, copy: &ContactSectionCopy) -> Result<ContactForm, FieldErrors> {
        self.errors = validate_form(&self.form, copy);
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }

        let payload = self.form.trimmed();
        self.form = ContactForm {
            form_start_time: payload.form_start_time,
            ..Default::default()
        };
        Ok(payload)
    }
}
