//! Pre-CMS data shapes and their mapping onto the canonical models
//!
//! Every function here is pure and total: missing optional data becomes `None`,
//! required fields are always filled.

use super::company::CompanyLogo;
use super::image::ImageAsset;
use super::page::{ContentSection, SectionTheme};
use super::person::{Person, PersonType, person_id};
use super::settings::NavigationLink;
use serde::{Deserialize, Serialize};

/// Section color that maps to the light theme
const LIGHT_SECTION_COLOR: &str = "#fff";

/// Directory holding the hero strip partner logos
const FEATURE_PARTNER_LOGO_DIR: &str = "/static/images/feature/partners";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegacySection {
    pub title: String,
    pub subtitle: String,
    pub color: String,
    pub bg: String,
}

/// Flat speaker or team member record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegacyPerson {
    pub name: String,
    pub image: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegacyHeaderLink {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegacyFeaturePartner {
    pub name: String,
    pub height: String,
    pub width: String,
}

pub fn legacy_section_to_content_section(legacy: &LegacySection) -> ContentSection {
    let theme = if legacy.color == LIGHT_SECTION_COLOR {
        SectionTheme::Light
    } else {
        SectionTheme::Dark
    };
    ContentSection {
        title: legacy.title.clone(),
        subtitle: legacy.subtitle.clone(),
        theme,
        background_image: Some(legacy.bg.clone()),
        legacy_color: Some(legacy.color.clone()),
    }
}

/// Map a flat person record to a [`Person`], using `index` as display order
pub fn legacy_person_to_person(legacy: &LegacyPerson, person_type: PersonType, index: usize) -> Person {
    Person {
        id: person_id(person_type, &legacy.name),
        name: legacy.name.clone(),
        role: legacy.role.clone(),
        company: None,
        image: ImageAsset::new(
            legacy.image.clone(),
            format!("{} - {}", legacy.name, legacy.role),
        ),
        bio: None,
        social_links: None,
        featured: None,
        order: Some(index as i64),
        person_type,
        document_id: None,
    }
}

/// Flatten a [`Person`] back into the legacy record shape
pub fn person_to_legacy(person: &Person) -> LegacyPerson {
    LegacyPerson {
        name: person.name.clone(),
        image: person.image.src.clone(),
        role: person.role.clone(),
    }
}

pub fn legacy_image_to_image_asset(src: &str, alt: &str) -> ImageAsset {
    ImageAsset::new(src, alt)
}

pub fn legacy_header_link_to_navigation_link(link: &LegacyHeaderLink) -> NavigationLink {
    NavigationLink {
        title: link.title.clone(),
        url: link.link.clone(),
        open_in_new_tab: Some(false),
    }
}

pub fn legacy_feature_partner_to_company_logo(partner: &LegacyFeaturePartner) -> CompanyLogo {
    CompanyLogo {
        name: partner.name.clone(),
        logo: ImageAsset::new(
            format!("{}/{}.png", FEATURE_PARTNER_LOGO_DIR, partner.name),
            format!("{} logo", partner.name),
        )
        .with_dimensions(css_pixels(&partner.width), css_pixels(&partner.height)),
        display_width: Some(partner.width.clone()),
        display_height: Some(partner.height.clone()),
    }
}

/// Leading integer of a CSS length such as `"242px"`
fn css_pixels(value: &str) -> Option<u32> {
    let trimmed = value.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_theme_from_color() {
        let light = LegacySection {
            title: "Invite".to_string(),
            subtitle: "Sub".to_string(),
            color: "#fff".to_string(),
            bg: "/static/images/invite/bg.png".to_string(),
        };
        let section = legacy_section_to_content_section(&light);
        assert_eq!(section.theme, SectionTheme::Light);
        assert_eq!(section.background_image.as_deref(), Some("/static/images/invite/bg.png"));
        assert_eq!(section.legacy_color.as_deref(), Some("#fff"));

        let dark = LegacySection {
            color: "#3f354d".to_string(),
            ..light
        };
        assert_eq!(legacy_section_to_content_section(&dark).theme, SectionTheme::Dark);
    }

    #[test]
    fn test_legacy_person_reads_back() {
        let legacy = LegacyPerson {
            name: "Tim Draper".to_string(),
            image: "/images/our_speakers/Tim_Draper.png".to_string(),
            role: "Founder, Draper Associates".to_string(),
        };
        let person = legacy_person_to_person(&legacy, PersonType::Speaker, 1);
        assert_eq!(person.id, "speaker-tim-draper");
        assert_eq!(person.name, legacy.name);
        assert_eq!(person.role, legacy.role);
        assert_eq!(person.image.src, legacy.image);
        assert_eq!(person.image.alt, "Tim Draper - Founder, Draper Associates");
        assert_eq!(person.order, Some(1));
        assert_eq!(person_to_legacy(&person), legacy);
    }

    #[test]
    fn test_feature_partner_logo() {
        let logo = legacy_feature_partner_to_company_logo(&LegacyFeaturePartner {
            name: "WeDiggIT".to_string(),
            height: "45px".to_string(),
            width: "242px".to_string(),
        });
        assert_eq!(logo.logo.src, "/static/images/feature/partners/WeDiggIT.png");
        assert_eq!(logo.logo.alt, "WeDiggIT logo");
        assert_eq!(logo.logo.width, Some(242));
        assert_eq!(logo.logo.height, Some(45));
        assert_eq!(logo.display_width.as_deref(), Some("242px"));
    }

    #[test]
    fn test_css_pixels_unparseable() {
        assert_eq!(css_pixels("auto"), None);
        assert_eq!(css_pixels(""), None);
        assert_eq!(css_pixels("12.5rem"), Some(12));
    }

    #[test]
    fn test_header_link() {
        let link = legacy_header_link_to_navigation_link(&LegacyHeaderLink {
            title: "Speakers".to_string(),
            link: "#Speakers".to_string(),
        });
        assert_eq!(link.url, "#Speakers");
        assert_eq!(link.open_in_new_tab, Some(false));
    }
}
