//! Image asset model

use serde::{Deserialize, Serialize};

/// Focal point of an image, in fractions of its width/height
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub width: f64,
}

/// Crop insets, in fractions of the image size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Crop {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Image reference with the metadata needed to render it.
///
/// `alt` must be non-empty for any image that is actually rendered; adapters
/// use [`ImageAsset::with_fallback_alt`] when the upstream source has none.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Low-quality placeholder (data URL) shown while the image loads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<Hotspot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<Crop>,
}

impl ImageAsset {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            ..Default::default()
        }
    }

    /// Image with no source, used when the upstream record has no asset attached
    pub fn placeholder(alt: impl Into<String>) -> Self {
        Self::new(String::new(), alt)
    }

    pub fn with_dimensions(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replace an empty (or whitespace-only) alt text with `fallback`
    pub fn with_fallback_alt(mut self, fallback: impl Into<String>) -> Self {
        if self.alt.trim().is_empty() {
            self.alt = fallback.into();
        }
        self
    }

    /// An image can be rendered once it has both a source and an alt text
    pub fn is_renderable(&self) -> bool {
        !self.src.trim().is_empty() && !self.alt.trim().is_empty()
    }
}
