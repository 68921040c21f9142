//! Site-wide settings model
//!
//! Exactly one `SiteSettings` exists per deployment. Both content sources
//! produce it; the static source computes the footer year at read time.

use serde::{Deserialize, Serialize};

/// Maximum number of entries in the main navigation
pub const MAX_NAVIGATION_LINKS: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub seo: SeoMetadata,
    pub logo: LogoDescriptor,
    pub footer: FooterInfo,
    pub primary_cta: CallToAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_url: Option<String>,
    #[serde(default)]
    pub navigation: Vec<NavigationLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_section: Option<ContactSectionCopy>,
}

impl SiteSettings {
    /// Check the singleton's invariants, returning one message per violation
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.title.trim().is_empty() {
            problems.push("Site title is empty".to_string());
        }
        if self.navigation.len() > MAX_NAVIGATION_LINKS {
            problems.push(format!(
                "Navigation has {} links (max {})",
                self.navigation.len(),
                MAX_NAVIGATION_LINKS
            ));
        }
        if self.footer.email.trim().is_empty() {
            problems.push("Footer contact email is empty".to_string());
        }
        problems
    }

    /// Contact form copy, falling back to the default wording
    pub fn contact_copy(&self) -> ContactSectionCopy {
        self.contact_section.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    pub site_url: String,
    pub site_name: String,
    pub locale: String,
    pub og_image: OgImage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,
}

/// Social sharing image
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogoDescriptor {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FooterInfo {
    pub copyright_text: String,
    #[serde(default)]
    pub year: i32,
    pub email: String,
}

/// Visual style of a call-to-action button
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CtaStyle {
    #[default]
    Primary,
    Secondary,
    Outline,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallToAction {
    pub text: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_in_new_tab: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CtaStyle>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavigationLink {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_in_new_tab: Option<bool>,
}

/// Copy and labels of the contact form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactSectionCopy {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub field_labels: ContactFieldLabels,
    pub button_text: ContactButtonText,
    pub messages: ContactMessages,
    pub validation_messages: ContactValidationMessages,
}

impl Default for ContactSectionCopy {
    fn default() -> Self {
        Self {
            title: "Contact".to_string(),
            description: None,
            field_labels: ContactFieldLabels::default(),
            button_text: ContactButtonText::default(),
            messages: ContactMessages::default(),
            validation_messages: ContactValidationMessages::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactFieldLabels {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl Default for ContactFieldLabels {
    fn default() -> Self {
        Self {
            first_name: "First Name".to_string(),
            last_name: "Last Name".to_string(),
            email: "Email".to_string(),
            company: "Company".to_string(),
            message: "Message".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactButtonText {
    #[serde(rename = "default")]
    pub idle: String,
    pub submitting: String,
}

impl Default for ContactButtonText {
    fn default() -> Self {
        Self {
            idle: "Send".to_string(),
            submitting: "Sending...".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactMessages {
    pub success: String,
    pub error: String,
    pub rate_limit_error: String,
}

impl Default for ContactMessages {
    fn default() -> Self {
        Self {
            success: "We've got your message!".to_string(),
            error: "Failed to send message. Please try again.".to_string(),
            rate_limit_error: "Too many requests. Please try again later.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactValidationMessages {
    pub first_name_required: String,
    pub last_name_required: String,
    pub email_required: String,
    pub email_invalid: String,
    pub message_required: String,
}

impl Default for ContactValidationMessages {
    fn default() -> Self {
        Self {
            first_name_required: "First name is required".to_string(),
            last_name_required: "Last name is required".to_string(),
            email_required: "Email is required".to_string(),
            email_invalid: "Please enter a valid email address".to_string(),
            message_required: "Message is required".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_navigation(count: usize) -> SiteSettings {
        SiteSettings {
            title: "Summit".to_string(),
            description: "desc".to_string(),
            keywords: vec![],
            seo: SeoMetadata {
                site_url: "https://example.com".to_string(),
                site_name: "Summit".to_string(),
                locale: "en_US".to_string(),
                og_image: OgImage {
                    url: "/og.png".to_string(),
                    width: 1200,
                    height: 630,
                    alt: "Summit".to_string(),
                },
                twitter_handle: None,
            },
            logo: LogoDescriptor {
                text: "Summit".to_string(),
                url: None,
            },
            footer: FooterInfo {
                copyright_text: "Summit".to_string(),
                year: 2026,
                email: "hello@example.com".to_string(),
            },
            primary_cta: CallToAction {
                text: "Join".to_string(),
                url: "/join".to_string(),
                open_in_new_tab: None,
                style: None,
            },
            event_url: None,
            navigation: (0..count)
                .map(|i| NavigationLink {
                    title: format!("Link {}", i),
                    url: format!("#link-{}", i),
                    open_in_new_tab: None,
                })
                .collect(),
            contact_section: None,
        }
    }

    #[test]
    fn test_navigation_limit() {
        assert!(settings_with_navigation(MAX_NAVIGATION_LINKS).validate().is_empty());
        let problems = settings_with_navigation(MAX_NAVIGATION_LINKS + 1).validate();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("Navigation"));
    }

    #[test]
    fn test_contact_copy_defaults() {
        let copy = settings_with_navigation(0).contact_copy();
        assert_eq!(copy.button_text.idle, "Send");
        assert_eq!(copy.messages.rate_limit_error, "Too many requests. Please try again later.");
    }

    #[test]
    fn test_partial_contact_copy_fills_defaults() {
        let copy: ContactSectionCopy = serde_json::from_value(serde_json::json!({
            "title": "Get in touch",
            "buttonText": {"default": "Submit"}
        }))
        .unwrap();
        assert_eq!(copy.title, "Get in touch");
        assert_eq!(copy.button_text.idle, "Submit");
        assert_eq!(copy.button_text.submitting, "Sending...");
        assert_eq!(copy.field_labels.email, "Email");
    }

    #[test]
    fn test_cta_style_wire_format() {
        let cta: CallToAction = serde_json::from_value(serde_json::json!({
            "text": "Tickets",
            "url": "https://example.com",
            "openInNewTab": true,
            "style": "outline"
        }))
        .unwrap();
        assert_eq!(cta.style, Some(CtaStyle::Outline));
        assert_eq!(cta.open_in_new_tab, Some(true));
    }
}
