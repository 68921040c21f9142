//! Sanity CMS content source
//!
//! Fetches documents with the queries in [`super::queries`] and maps them onto
//! the canonical models. GROQ projections yield `null` for absent fields and
//! for dangling references, so every response goes through [`strip_nulls`]
//! before decoding and the serde defaults below take over.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::client::GroqClient;
use super::queries::{
    ALL_PARTNERS_QUERY, ALL_SPEAKERS_QUERY, ALL_SUPPORTERS_QUERY, ALL_TEAM_QUERY,
    COMPANY_BY_ID_QUERY, DOCUMENT_COUNTS_QUERY, HOME_PAGE_QUERY, PERSON_BY_ID_QUERY,
    SITE_SETTINGS_QUERY,
};
use super::{ContentError, ContentSource};
use crate::models::{
    CallToAction, Company, CompanyLogo, CompanyTier, ContactSectionCopy, ContentSection, Crop,
    FooterInfo, HeroSection, HomePage, HomeSections, Hotspot, ImageAsset, LogoDescriptor,
    MAX_NAVIGATION_LINKS, NavigationLink, OgImage, PartnerSection, PeopleSection, Person,
    PersonType, SectionTheme, SeoMetadata, SiteSettings, SocialLink, person_id, sort_by_order,
};

/// Background images of the about and invite sections are served from the
/// site, not from the CMS
const ABOUT_BACKGROUND: &str = "/static/images/about/bg.png";
const INVITE_BACKGROUND: &str = "/static/images/invite/bg.png";

const DEFAULT_OG_WIDTH: u32 = 1200;
const DEFAULT_OG_HEIGHT: u32 = 630;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawImage {
    asset: Option<RawAsset>,
    alt: Option<String>,
    hotspot: Option<Hotspot>,
    crop: Option<Crop>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAsset {
    url: Option<String>,
    metadata: Option<RawAssetMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAssetMetadata {
    lqip: Option<String>,
    dimensions: Option<RawDimensions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDimensions {
    width: Option<f64>,
    height: Option<f64>,
}

impl RawImage {
    fn url(&self) -> Option<&str> {
        self.asset
            .as_ref()
            .and_then(|asset| asset.url.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// `None` when no asset is attached
    fn into_asset(self, fallback_alt: &str) -> Option<ImageAsset> {
        let src = self.url()?.to_string();
        let metadata = self.asset.and_then(|asset| asset.metadata).unwrap_or_default();
        let dimensions = metadata.dimensions.unwrap_or_default();

        let mut image = ImageAsset::new(src, self.alt.unwrap_or_default())
            .with_dimensions(pixels(dimensions.width), pixels(dimensions.height))
            .with_fallback_alt(fallback_alt);
        image.blur_data_url = metadata.lqip;
        image.hotspot = self.hotspot;
        image.crop = self.crop;
        Some(image)
    }
}

fn pixels(value: Option<f64>) -> Option<u32> {
    value.filter(|v| *v >= 0.0).map(|v| v.round() as u32)
}

/// Image for a required slot: a missing asset becomes a placeholder
fn image_or_placeholder(raw: Option<RawImage>, fallback_alt: &str) -> ImageAsset {
    raw.and_then(|image| image.into_asset(fallback_alt))
        .unwrap_or_else(|| ImageAsset::placeholder(fallback_alt))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPerson {
    #[serde(rename = "_id")]
    document_id: String,
    name: String,
    #[serde(default)]
    role: String,
    #[serde(default, rename = "type")]
    person_type: Option<PersonType>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    image: Option<RawImage>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    social_links: Option<Vec<SocialLink>>,
    #[serde(default)]
    featured: Option<bool>,
    #[serde(default)]
    order: Option<i64>,
}

impl RawPerson {
    /// The id is rebuilt from name and type so it matches the static source;
    /// the CMS `_id` is kept as `document_id`.
    fn into_person(self, default_type: PersonType) -> Person {
        let person_type = self.person_type.unwrap_or(default_type);
        let alt = if self.role.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.role)
        };
        Person {
            id: person_id(person_type, &self.name),
            image: image_or_placeholder(self.image, &alt),
            name: self.name,
            role: self.role,
            company: self.company,
            bio: self.bio,
            social_links: self.social_links,
            featured: self.featured,
            order: self.order,
            person_type,
            document_id: Some(self.document_id),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCompany {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(default)]
    logo: Option<RawImage>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    tier: Option<CompanyTier>,
    #[serde(default)]
    featured: Option<bool>,
    #[serde(default)]
    order: Option<i64>,
}

impl RawCompany {
    fn into_company(self) -> Company {
        Company {
            logo: image_or_placeholder(self.logo, &format!("{} logo", self.name)),
            id: self.id,
            name: self.name,
            website: self.website,
            tier: self.tier,
            featured: self.featured,
            order: self.order,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompanyLogo {
    name: String,
    #[serde(default)]
    logo: Option<RawImage>,
    #[serde(default)]
    display_width: Option<String>,
    #[serde(default)]
    display_height: Option<String>,
}

impl RawCompanyLogo {
    fn into_company_logo(self) -> CompanyLogo {
        CompanyLogo {
            logo: image_or_placeholder(self.logo, &format!("{} logo", self.name)),
            name: self.name,
            display_width: self.display_width,
            display_height: self.display_height,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSiteSettings {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    keywords: Vec<String>,
    seo: RawSeo,
    logo: RawLogo,
    footer: RawFooter,
    primary_cta: CallToAction,
    #[serde(default)]
    event_url: Option<String>,
    #[serde(default)]
    navigation: Vec<NavigationLink>,
    #[serde(default)]
    contact_section: Option<ContactSectionCopy>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeo {
    #[serde(default)]
    site_url: String,
    #[serde(default)]
    site_name: String,
    #[serde(default)]
    locale: String,
    #[serde(default)]
    og_image: Option<RawOgImage>,
    #[serde(default)]
    twitter_handle: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawOgImage {
    image: Option<RawImage>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawLogo {
    text: String,
    #[serde(default)]
    image: Option<RawImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFooter {
    #[serde(default)]
    copyright_text: String,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    email: String,
}

impl RawSiteSettings {
    fn into_settings(self) -> SiteSettings {
        let og = self.seo.og_image.unwrap_or_default();
        let og_image = og.image.unwrap_or_default();
        let og_url = og_image.url().unwrap_or_default().to_string();
        let og_alt = og_image
            .alt
            .filter(|alt| !alt.trim().is_empty())
            .unwrap_or_else(|| self.title.clone());

        let mut navigation = self.navigation;
        if navigation.len() > MAX_NAVIGATION_LINKS {
            warn!(
                "Site settings have {} navigation links, keeping the first {}",
                navigation.len(),
                MAX_NAVIGATION_LINKS
            );
            navigation.truncate(MAX_NAVIGATION_LINKS);
        }

        SiteSettings {
            title: self.title,
            description: self.description,
            keywords: self.keywords,
            seo: SeoMetadata {
                site_url: self.seo.site_url,
                site_name: self.seo.site_name,
                locale: self.seo.locale,
                og_image: OgImage {
                    url: og_url,
                    width: og.width.unwrap_or(DEFAULT_OG_WIDTH),
                    height: og.height.unwrap_or(DEFAULT_OG_HEIGHT),
                    alt: og_alt,
                },
                twitter_handle: self.seo.twitter_handle,
            },
            logo: LogoDescriptor {
                url: self
                    .logo
                    .image
                    .as_ref()
                    .and_then(RawImage::url)
                    .map(str::to_string),
                text: self.logo.text,
            },
            footer: FooterInfo {
                copyright_text: self.footer.copyright_text,
                year: self.footer.year.unwrap_or_else(|| Utc::now().year()),
                email: self.footer.email,
            },
            primary_cta: self.primary_cta,
            event_url: self.event_url,
            navigation,
            contact_section: self.contact_section,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHomePage {
    hero: RawHero,
    about_section: RawContentSection,
    invite_section: RawContentSection,
    #[serde(default)]
    partners_title: String,
    #[serde(default)]
    partners: Vec<RawCompany>,
    #[serde(default)]
    supporters_title: String,
    #[serde(default)]
    supporters: Vec<RawCompany>,
    #[serde(default)]
    speakers_title: String,
    #[serde(default)]
    speakers: Vec<RawPerson>,
    #[serde(default)]
    team_title: String,
    #[serde(default)]
    team: Vec<RawPerson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHero {
    headline: String,
    title: String,
    #[serde(default)]
    title_highlight: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    background_image: Option<RawImage>,
    #[serde(default)]
    hero_image: Option<RawImage>,
    cta: CallToAction,
    #[serde(default)]
    featured_partners: Vec<RawCompanyLogo>,
}

#[derive(Debug, Deserialize)]
struct RawContentSection {
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    theme: SectionTheme,
}

impl RawContentSection {
    fn into_section(self, background: &str) -> ContentSection {
        ContentSection {
            title: self.title,
            subtitle: self.subtitle,
            theme: self.theme,
            background_image: Some(background.to_string()),
            legacy_color: None,
        }
    }
}

impl RawHomePage {
    fn into_home_page(self) -> HomePage {
        let hero_alt = self.hero.title.clone();
        HomePage {
            hero: HeroSection {
                background_image: self
                    .hero
                    .background_image
                    .as_ref()
                    .and_then(RawImage::url)
                    .map(str::to_string),
                hero_image: self
                    .hero
                    .hero_image
                    .and_then(|image| image.into_asset(&hero_alt)),
                headline: self.hero.headline,
                title: self.hero.title,
                title_highlight: self.hero.title_highlight,
                subtitle: self.hero.subtitle,
                description: self.hero.description,
                cta: self.hero.cta,
                featured_partners: self
                    .hero
                    .featured_partners
                    .into_iter()
                    .map(RawCompanyLogo::into_company_logo)
                    .collect(),
            },
            sections: HomeSections {
                about: self.about_section.into_section(ABOUT_BACKGROUND),
                invite: self.invite_section.into_section(INVITE_BACKGROUND),
            },
            partners: PartnerSection {
                title: self.partners_title,
                identifier: "Partners".to_string(),
                companies: self.partners.into_iter().map(RawCompany::into_company).collect(),
            },
            supporters: PartnerSection {
                title: self.supporters_title,
                identifier: "Supporters".to_string(),
                companies: self
                    .supporters
                    .into_iter()
                    .map(RawCompany::into_company)
                    .collect(),
            },
            speakers: PeopleSection {
                title: self.speakers_title,
                identifier: "Speakers".to_string(),
                people: self
                    .speakers
                    .into_iter()
                    .map(|p| p.into_person(PersonType::Speaker))
                    .collect(),
            },
            team: PeopleSection {
                title: self.team_title,
                identifier: "Team".to_string(),
                people: self
                    .team
                    .into_iter()
                    .map(|p| p.into_person(PersonType::Team))
                    .collect(),
            },
        }
    }
}

/// Per-type document counts of a dataset
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentCounts {
    pub speakers: u64,
    pub team: u64,
    pub partners: u64,
    pub supporters: u64,
    pub site_settings: u64,
    pub home_page: u64,
}

impl DocumentCounts {
    /// Both singletons exist exactly once
    pub fn has_singletons(&self) -> bool {
        self.site_settings == 1 && self.home_page == 1
    }
}

/// Remove `null` object members and `null` array elements, recursively
pub fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        other => other,
    }
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ContentError> {
    serde_json::from_value(strip_nulls(value)).map_err(|e| {
        ContentError::SerializationError(format!("Failed to decode {}: {}", what, e))
    })
}

/// Content source backed by a Sanity dataset
pub struct SanityContentSource<C: GroqClient> {
    client: C,
}

#[cfg(feature = "sanity-backend")]
impl SanityContentSource<super::client::SanityClient> {
    /// Create a source over the reqwest client
    pub fn from_config(config: super::client::SanityConfig) -> Result<Self, ContentError> {
        Ok(Self::new(super::client::SanityClient::new(config)?))
    }
}

impl<C: GroqClient> SanityContentSource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch a singleton; `null` means the document does not exist
    async fn fetch_singleton<T: DeserializeOwned>(
        &self,
        query: &str,
        document: &'static str,
    ) -> Result<T, ContentError> {
        let value = self.client.fetch(query, &[]).await?;
        if value.is_null() {
            return Err(ContentError::MissingDocument(document));
        }
        decode(value, document)
    }

    async fn fetch_collection<T: DeserializeOwned>(
        &self,
        query: &str,
        what: &str,
    ) -> Result<Vec<T>, ContentError> {
        let value = self.client.fetch(query, &[]).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        decode(value, what)
    }

    async fn fetch_by_id<T: DeserializeOwned>(
        &self,
        query: &str,
        id: &str,
        what: &str,
    ) -> Result<Option<T>, ContentError> {
        let value = self
            .client
            .fetch(query, &[("id", Value::String(id.to_string()))])
            .await?;
        if value.is_null() {
            return Ok(None);
        }
        decode(value, what).map(Some)
    }

    async fn people(&self, query: &str, person_type: PersonType) -> Result<Vec<Person>, ContentError> {
        let raw: Vec<RawPerson> = self.fetch_collection(query, "people").await?;
        let mut people: Vec<Person> = raw.into_iter().map(|p| p.into_person(person_type)).collect();
        // GROQ sorts a missing order first; the site lists those people last
        sort_by_order(&mut people);
        info!("Loaded {} {} records from Sanity", people.len(), person_type);
        Ok(people)
    }

    async fn companies(&self, query: &str, what: &str) -> Result<Vec<Company>, ContentError> {
        let raw: Vec<RawCompany> = self.fetch_collection(query, what).await?;
        let companies: Vec<Company> = raw.into_iter().map(RawCompany::into_company).collect();
        info!("Loaded {} {} from Sanity", companies.len(), what);
        Ok(companies)
    }

    /// Fetch one person by CMS document id
    pub async fn person_by_id(&self, document_id: &str) -> Result<Option<Person>, ContentError> {
        let raw: Option<RawPerson> = self
            .fetch_by_id(PERSON_BY_ID_QUERY, document_id, "person")
            .await?;
        Ok(raw.map(|p| p.into_person(PersonType::Speaker)))
    }

    /// Fetch one company by CMS document id
    pub async fn company_by_id(&self, document_id: &str) -> Result<Option<Company>, ContentError> {
        let raw: Option<RawCompany> = self
            .fetch_by_id(COMPANY_BY_ID_QUERY, document_id, "company")
            .await?;
        Ok(raw.map(RawCompany::into_company))
    }

    pub async fn document_counts(&self) -> Result<DocumentCounts, ContentError> {
        let value = self.client.fetch(DOCUMENT_COUNTS_QUERY, &[]).await?;
        let counts: DocumentCounts = decode(value, "document counts")?;
        debug!("Dataset document counts: {:?}", counts);
        Ok(counts)
    }
}

#[async_trait]
impl<C: GroqClient> ContentSource for SanityContentSource<C> {
    fn name(&self) -> &'static str {
        "Sanity CMS"
    }

    async fn site_settings(&self) -> Result<SiteSettings, ContentError> {
        let raw: RawSiteSettings = self
            .fetch_singleton(SITE_SETTINGS_QUERY, "siteSettings")
            .await?;
        Ok(raw.into_settings())
    }

    async fn home_page(&self) -> Result<HomePage, ContentError> {
        let raw: RawHomePage = self.fetch_singleton(HOME_PAGE_QUERY, "homePage").await?;
        Ok(raw.into_home_page())
    }

    async fn all_speakers(&self) -> Result<Vec<Person>, ContentError> {
        self.people(ALL_SPEAKERS_QUERY, PersonType::Speaker).await
    }

    async fn all_team_members(&self) -> Result<Vec<Person>, ContentError> {
        self.people(ALL_TEAM_QUERY, PersonType::Team).await
    }

    async fn all_partners(&self) -> Result<Vec<Company>, ContentError> {
        self.companies(ALL_PARTNERS_QUERY, "partners").await
    }

    async fn all_supporters(&self) -> Result<Vec<Company>, ContentError> {
        self.companies(ALL_SUPPORTERS_QUERY, "supporters").await
    }
}
