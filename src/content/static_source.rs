//! Static content source
//!
//! Builds the canonical models from data compiled into the crate. No network
//! I/O; every method is synchronous and returns freshly built values. The
//! [`ContentSource`] impl wraps the synchronous methods.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ContentError, ContentSource};
use crate::data;
use crate::models::{
    CallToAction, Company, CompanyLogo, CompanyTier, ContentSection, HeroSection, HomePage,
    HomeSections, ImageAsset, LegacyPerson, MAX_NAVIGATION_LINKS, NavigationLink,
    PartnerSection, PeopleSection, Person, PersonType, SiteSettings, extract_company_name,
    legacy_feature_partner_to_company_logo, legacy_header_link_to_navigation_link,
    legacy_image_to_image_asset, legacy_person_to_person, legacy_section_to_content_section,
};

/// Home page JSON document
#[derive(Debug, Clone, Deserialize)]
struct HomePageDocument {
    hero: HeroDocument,
    speakers: SectionHeading,
    team: SectionHeading,
    partners: SectionHeading,
    supporters: SectionHeading,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeroDocument {
    headline: String,
    title: String,
    title_highlight: String,
    subtitle: String,
    description: String,
    #[serde(default)]
    background_image: Option<String>,
    #[serde(default)]
    hero_image: Option<ImageAsset>,
    cta: CallToAction,
}

#[derive(Debug, Clone, Deserialize)]
struct SectionHeading {
    title: String,
    identifier: String,
}

/// Content source backed by the bundled data
#[derive(Debug, Clone)]
pub struct StaticContentSource {
    settings: SiteSettings,
    home: HomePageDocument,
    year: Option<i32>,
}

impl StaticContentSource {
    /// Create a source over the documents embedded in the crate
    ///
    /// # Example
    ///
    /// ```rust
    /// use summit_content::content::StaticContentSource;
    ///
    /// let source = StaticContentSource::new().unwrap();
    /// assert!(!source.all_speakers().is_empty());
    /// ```
    pub fn new() -> Result<Self, ContentError> {
        Self::from_documents(data::SETTINGS_JSON, data::HOME_PAGE_JSON)
    }

    /// Create a source over caller-supplied settings and home page documents
    pub fn from_documents(settings_json: &str, home_json: &str) -> Result<Self, ContentError> {
        let mut settings: SiteSettings = serde_json::from_str(settings_json).map_err(|e| {
            ContentError::SerializationError(format!("Failed to parse settings document: {}", e))
        })?;
        let home: HomePageDocument = serde_json::from_str(home_json).map_err(|e| {
            ContentError::SerializationError(format!("Failed to parse home page document: {}", e))
        })?;

        if settings.navigation.len() > MAX_NAVIGATION_LINKS {
            warn!(
                "Settings document has {} navigation links, keeping the first {}",
                settings.navigation.len(),
                MAX_NAVIGATION_LINKS
            );
            settings.navigation.truncate(MAX_NAVIGATION_LINKS);
        }

        debug!("Loaded static settings and home page documents");
        Ok(Self {
            settings,
            home,
            year: None,
        })
    }

    /// Pin the footer year instead of reading the clock
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Settings document with the footer year filled in
    pub fn site_settings(&self) -> SiteSettings {
        let mut settings = self.settings.clone();
        settings.footer.year = self.year.unwrap_or_else(|| Utc::now().year());
        settings
    }

    pub fn primary_cta(&self) -> CallToAction {
        self.site_settings().primary_cta
    }

    /// Navigation built from the legacy header links
    pub fn navigation_links(&self) -> Vec<NavigationLink> {
        data::header_links()
            .iter()
            .map(legacy_header_link_to_navigation_link)
            .collect()
    }

    pub fn home_page(&self) -> HomePage {
        HomePage {
            hero: self.hero_section(),
            sections: HomeSections {
                about: self.about_section(),
                invite: self.invite_section(),
            },
            partners: self.partners_section(),
            supporters: self.supporters_section(),
            speakers: self.speakers_section(),
            team: self.team_section(),
        }
    }

    pub fn hero_section(&self) -> HeroSection {
        let hero = self.home.hero.clone();
        HeroSection {
            headline: hero.headline,
            title: hero.title,
            title_highlight: hero.title_highlight,
            subtitle: hero.subtitle,
            description: hero.description,
            background_image: hero.background_image,
            hero_image: hero.hero_image,
            cta: hero.cta,
            featured_partners: self.featured_partners(),
        }
    }

    pub fn about_section(&self) -> ContentSection {
        legacy_section_to_content_section(&data::about())
    }

    pub fn invite_section(&self) -> ContentSection {
        legacy_section_to_content_section(&data::invite())
    }

    pub fn all_speakers(&self) -> Vec<Person> {
        people(data::SPEAKERS, PersonType::Speaker)
    }

    pub fn all_team_members(&self) -> Vec<Person> {
        people(data::TEAM, PersonType::Team)
    }

    pub fn speakers_section(&self) -> PeopleSection {
        PeopleSection {
            title: self.home.speakers.title.clone(),
            identifier: self.home.speakers.identifier.clone(),
            people: self.all_speakers(),
        }
    }

    pub fn team_section(&self) -> PeopleSection {
        PeopleSection {
            title: self.home.team.title.clone(),
            identifier: self.home.team.identifier.clone(),
            people: self.all_team_members(),
        }
    }

    pub fn all_partners(&self) -> Vec<Company> {
        companies(data::PARTNER_LOGOS, "partner", "Partner logo", CompanyTier::Platinum)
    }

    pub fn all_supporters(&self) -> Vec<Company> {
        companies(
            data::SUPPORTER_LOGOS,
            "supporter",
            "Supporter logo",
            CompanyTier::Supporter,
        )
    }

    pub fn partners_section(&self) -> PartnerSection {
        PartnerSection {
            title: self.home.partners.title.clone(),
            identifier: self.home.partners.identifier.clone(),
            companies: self.all_partners(),
        }
    }

    pub fn supporters_section(&self) -> PartnerSection {
        PartnerSection {
            title: self.home.supporters.title.clone(),
            identifier: self.home.supporters.identifier.clone(),
            companies: self.all_supporters(),
        }
    }

    /// Partner logos for the hero strip
    pub fn featured_partners(&self) -> Vec<CompanyLogo> {
        data::feature_partners()
            .iter()
            .map(legacy_feature_partner_to_company_logo)
            .collect()
    }

    pub fn partner_logo_urls(&self) -> Vec<String> {
        data::PARTNER_LOGOS.iter().map(|url| url.to_string()).collect()
    }

    pub fn supporter_logo_urls(&self) -> Vec<String> {
        data::SUPPORTER_LOGOS.iter().map(|url| url.to_string()).collect()
    }

    pub fn legacy_speakers_data(&self) -> Vec<LegacyPerson> {
        data::SPEAKERS.iter().map(|r| r.to_owned_person()).collect()
    }

    pub fn legacy_team_data(&self) -> Vec<LegacyPerson> {
        data::TEAM.iter().map(|r| r.to_owned_person()).collect()
    }
}

fn people(records: &[data::LegacyPersonRecord], person_type: PersonType) -> Vec<Person> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| legacy_person_to_person(&record.to_owned_person(), person_type, index))
        .collect()
}

fn companies(urls: &[&str], id_prefix: &str, alt: &str, tier: CompanyTier) -> Vec<Company> {
    urls.iter()
        .enumerate()
        .map(|(index, url)| Company {
            id: format!("{}-{}", id_prefix, index),
            name: extract_company_name(url),
            logo: legacy_image_to_image_asset(url, alt),
            website: None,
            tier: Some(tier),
            featured: None,
            order: Some(index as i64),
        })
        .collect()
}

#[async_trait]
impl ContentSource for StaticContentSource {
    fn name(&self) -> &'static str {
        "Static JSON"
    }

    async fn site_settings(&self) -> Result<SiteSettings, ContentError> {
        Ok(StaticContentSource::site_settings(self))
    }

    async fn home_page(&self) -> Result<HomePage, ContentError> {
        Ok(StaticContentSource::home_page(self))
    }

    async fn all_speakers(&self) -> Result<Vec<Person>, ContentError> {
        Ok(StaticContentSource::all_speakers(self))
    }

    async fn all_team_members(&self) -> Result<Vec<Person>, ContentError> {
        Ok(StaticContentSource::all_team_members(self))
    }

    async fn all_partners(&self) -> Result<Vec<Company>, ContentError> {
        Ok(StaticContentSource::all_partners(self))
    }

    async fn all_supporters(&self) -> Result<Vec<Company>, ContentError> {
        Ok(StaticContentSource::all_supporters(self))
    }

    async fn navigation_links(&self) -> Result<Vec<NavigationLink>, ContentError> {
        Ok(StaticContentSource::navigation_links(self))
    }

    async fn featured_partners(&self) -> Result<Vec<CompanyLogo>, ContentError> {
        Ok(StaticContentSource::featured_partners(self))
    }

    async fn legacy_speakers_data(&self) -> Result<Vec<LegacyPerson>, ContentError> {
        Ok(StaticContentSource::legacy_speakers_data(self))
    }

    async fn legacy_team_data(&self) -> Result<Vec<LegacyPerson>, ContentError> {
        Ok(StaticContentSource::legacy_team_data(self))
    }

    async fn partner_logo_urls(&self) -> Result<Vec<String>, ContentError> {
        Ok(StaticContentSource::partner_logo_urls(self))
    }

    async fn supporter_logo_urls(&self) -> Result<Vec<String>, ContentError> {
        Ok(StaticContentSource::supporter_logo_urls(self))
    }
}
