//! The closed set of target platforms.
//!
//! Every per-platform table in the crate is a total function over
//! [`Platform`]: output dimensions ([`dimensions_for`]), the response schema
//! shape ([`schema_field_for`]), display names and the writing guidance fed
//! into the generation schema. Adding a platform means adding a variant
//! here; the compiler then points at every `match` that needs a new arm.
//!
//! ## Dimension Table
//!
//! ```text
//! facebook    1080 x 1080   1:1
//! instagram   1080 x 1080   1:1
//! twitter     1600 x  900   16:9
//! linkedin    1200 x 1200   1:1
//! vk          1080 x 1080   1:1
//! pinterest   1000 x 1500   2:3
//! youtube     1280 x  720   16:9 (thumbnail)
//! tiktok      1080 x 1920   9:16
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A target social network.
///
/// Declaration order is the canonical iteration order (see [`Platform::ALL`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
    Vk,
    Pinterest,
    Youtube,
    Tiktok,
}

/// Required output size of a platform's adapted image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDimension {
    pub width: u32,
    pub height: u32,
}

/// Shape of a platform's field in the generation schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaField {
    /// A single block of post text.
    Text,
    /// A `{title, description}` pair (video and pin metadata).
    TitleDescription,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

impl Platform {
    pub const ALL: [Platform; 8] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Linkedin,
        Platform::Vk,
        Platform::Pinterest,
        Platform::Youtube,
        Platform::Tiktok,
    ];

    /// Identifier used as the schema key, in filenames and on the CLI.
    pub fn key(self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Vk => "vk",
            Platform::Pinterest => "pinterest",
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::Twitter => "X (Twitter)",
            Platform::Linkedin => "LinkedIn",
            Platform::Vk => "VK",
            Platform::Pinterest => "Pinterest",
            Platform::Youtube => "YouTube",
            Platform::Tiktok => "TikTok",
        }
    }

    /// Whether the generated copy may carry the raw product URL.
    ///
    /// Instagram and TikTok captions don't render clickable links, so the
    /// copy points readers to the profile instead.
    pub fn allows_inline_link(self) -> bool {
        !matches!(self, Platform::Instagram | Platform::Tiktok)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.key() == lower)
            .or(match lower.as_str() {
                "x" => Some(Platform::Twitter),
                _ => None,
            })
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

/// Output dimensions for a platform's adapted image.
pub const fn dimensions_for(platform: Platform) -> PlatformDimension {
    let (width, height) = match platform {
        Platform::Facebook => (1080, 1080),
        Platform::Instagram => (1080, 1080),
        Platform::Twitter => (1600, 900),
        Platform::Linkedin => (1200, 1200),
        Platform::Vk => (1080, 1080),
        Platform::Pinterest => (1000, 1500),
        Platform::Youtube => (1280, 720),
        Platform::Tiktok => (1080, 1920),
    };
    PlatformDimension { width, height }
}

/// Schema shape for a platform's generated content.
pub const fn schema_field_for(platform: Platform) -> SchemaField {
    match platform {
        Platform::Pinterest | Platform::Youtube => SchemaField::TitleDescription,
        _ => SchemaField::Text,
    }
}

/// Writing guidance embedded in the response schema as the field description.
///
/// For [`SchemaField::TitleDescription`] platforms this returns
/// `(title guidance, description guidance)` via [`titled_guidance`];
/// this function describes the field as a whole.
pub fn field_guidance(platform: Platform) -> &'static str {
    match platform {
        Platform::Facebook => {
            "Facebook post: conversational, moderate length, emojis, a clear call to action and the product link."
        }
        Platform::Instagram => {
            "Instagram caption: strong visual hook, emojis, a 'Link in Bio' call to action instead of the raw URL, and a block of 15-20 relevant hashtags at the bottom."
        }
        Platform::Twitter => {
            "X (Twitter) post: short and punchy, emojis, trending hashtags and the product link. MUST NOT exceed 300 characters."
        }
        Platform::Linkedin => {
            "LinkedIn post: professional business tone, clear value proposition, bullet points where useful, restrained emojis, 3-5 relevant hashtags and the product link."
        }
        Platform::Vk => {
            "VK (VKontakte) post: informal yet informative and community-focused, emojis, hashtags and the product link."
        }
        Platform::Pinterest => "Pinterest pin with an SEO title and description.",
        Platform::Youtube => "YouTube video title and description.",
        Platform::Tiktok => {
            "TikTok caption: energetic hook in the first line, emojis, a 'Link in Bio' call to action instead of the raw URL, and 3-6 trending hashtags."
        }
    }
}

/// Guidance for the `title` and `description` subfields of titled platforms.
///
/// Returns `None` for [`SchemaField::Text`] platforms.
pub fn titled_guidance(platform: Platform) -> Option<(&'static str, &'static str)> {
    match platform {
        Platform::Pinterest => Some((
            "SEO-optimized, catchy pin title.",
            "Detailed SEO pin description with keywords, hashtags and a call to action.",
        )),
        Platform::Youtube => Some((
            "High click-through YouTube title, keyword-rich, ideally under 60 characters and never over 100.",
            "Comprehensive YouTube description: a hook in the first two lines, the product link in the first paragraph, natural keyword usage, a call to action, and 3-5 hashtags at the bottom.",
        )),
        _ => None,
    }
}
