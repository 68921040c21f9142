//! Canonical content models
//!
//! The shapes every content source must produce. Presentation code consumes
//! these and never needs to know which source built them.

pub mod company;
pub mod image;
pub mod legacy;
pub mod page;
pub mod person;
pub mod settings;

pub use company::{Company, CompanyLogo, CompanyTier, extract_company_name};
pub use image::{Crop, Hotspot, ImageAsset};
pub use legacy::{
    LegacyFeaturePartner, LegacyHeaderLink, LegacyPerson, LegacySection,
    legacy_feature_partner_to_company_logo, legacy_header_link_to_navigation_link,
    legacy_image_to_image_asset, legacy_person_to_person, legacy_section_to_content_section,
    person_to_legacy,
};
pub use page::{
    ContentSection, HeroSection, HomePage, HomeSections, PartnerSection, PeopleSection,
    SectionTheme,
};
pub use person::{Person, PersonType, SocialLink, SocialPlatform, person_id, sort_by_order};
pub use settings::{
    CallToAction, ContactButtonText, ContactFieldLabels, ContactMessages, ContactSectionCopy,
    ContactValidationMessages, CtaStyle, FooterInfo, LogoDescriptor, MAX_NAVIGATION_LINKS,
    NavigationLink, OgImage, SeoMetadata, SiteSettings,
};
