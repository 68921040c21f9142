//! Page view models
//!
//! Composite structures assembled from settings, people and companies. They are
//! rebuilt on every fetch and never persisted.

use super::company::{Company, CompanyLogo};
use super::image::ImageAsset;
use super::person::Person;
use super::settings::CallToAction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomePage {
    pub hero: HeroSection,
    pub sections: HomeSections,
    pub partners: PartnerSection,
    pub supporters: PartnerSection,
    pub speakers: PeopleSection,
    pub team: PeopleSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomeSections {
    pub about: ContentSection,
    pub invite: ContentSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeroSection {
    pub headline: String,
    pub title: String,
    /// The part of `title` rendered highlighted
    pub title_highlight: String,
    pub subtitle: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<ImageAsset>,
    pub cta: CallToAction,
    #[serde(default)]
    pub featured_partners: Vec<CompanyLogo>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SectionTheme {
    Light,
    #[default]
    Dark,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentSection {
    pub title: String,
    pub subtitle: String,
    pub theme: SectionTheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Raw color of the pre-CMS section data
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_legacyColor")]
    pub legacy_color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartnerSection {
    pub title: String,
    /// Anchor used by navigation links, e.g. `Partners`
    pub identifier: String,
    pub companies: Vec<Company>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeopleSection {
    pub title: String,
    pub identifier: String,
    pub people: Vec<Person>,
}
