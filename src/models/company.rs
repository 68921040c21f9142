//! Company model (partners and supporters)

use super::image::ImageAsset;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CompanyTier {
    Platinum,
    Gold,
    Silver,
    Supporter,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub logo: ImageAsset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<CompanyTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Logo shown in the hero strip, with CSS display sizes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyLogo {
    pub name: String,
    pub logo: ImageAsset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_height: Option<String>,
}

/// Derive a company name from its logo URL.
///
/// Takes the last path segment, drops a trailing extension and turns `_` and
/// `-` into spaces: `/images/our_partners/Nuvei.png` becomes `Nuvei`.
/// Only the final extension is removed, so `simetria.io.png` becomes `simetria.io`.
pub fn extract_company_name(url: &str) -> String {
    let filename = url.rsplit('/').next().unwrap_or_default();
    let stem = match filename.rfind('.') {
        Some(dot) if dot + 1 < filename.len() => &filename[..dot],
        _ => filename,
    };
    stem.replace(['_', '-'], " ")
}
