//! Person model (speakers and team members)

use super::image::ImageAsset;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Discriminant between the two kinds of people shown on the site
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    Speaker,
    Team,
}

impl PersonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonType::Speaker => "speaker",
            PersonType::Team => "team",
        }
    }
}

impl fmt::Display for PersonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Twitter,
    Linkedin,
    Instagram,
    Facebook,
    Github,
    Website,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique within `person_type`; see [`person_id`]
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub image: ImageAsset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<SocialLink>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    /// Display order, lower first. Not necessarily contiguous.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(rename = "type")]
    pub person_type: PersonType,
    /// Id of the upstream CMS document, when the person came from one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

/// Build the canonical person id: `"{type}-{name}"` with the name lowercased
/// and every whitespace run replaced by a single `-`.
///
/// # Example
///
/// ```rust
/// use summit_content::models::{person_id, PersonType};
///
/// assert_eq!(person_id(PersonType::Speaker, "Tim Draper"), "speaker-tim-draper");
/// ```
pub fn person_id(person_type: PersonType, name: &str) -> String {
    let slug = WHITESPACE_RUN.replace_all(&name.to_lowercase(), "-").into_owned();
    format!("{}-{}", person_type, slug)
}

/// Sort people by display order; entries without an order go last
pub fn sort_by_order(people: &mut [Person]) {
    people.sort_by_key(|p| p.order.unwrap_or(i64::MAX));
}
