use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::demo::DemoLinks;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("URL is required")]
    MissingUrl,
    #[error("{}", invalid_url_message(.platform))]
    InvalidUrl {
        platform: Option<Platform>,
        url: String,
    },
    #[error("Could not extract {what} from URL")]
    ExtractionFailed {
        platform: Platform,
        what: &'static str,
    },
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
    #[error("Unsupported download type: {0}")]
    UnsupportedTarget(String),
}

fn invalid_url_message(platform: &Option<Platform>) -> String {
    match platform {
        Some(p) => format!("Invalid {} URL", p),
        None => "Unsupported URL".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    YouTube,
    TikTok,
    Instagram,
}

impl Platform {
    /// Inference order when the caller does not name a platform.
    pub const ALL: [Platform; 3] = [Platform::YouTube, Platform::TikTok, Platform::Instagram];

    pub fn slug(self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::TikTok => "tiktok",
            Platform::Instagram => "instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
            Platform::Instagram => "Instagram",
        })
    }
}

impl FromStr for Platform {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ExtractError::UnknownPlatform(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Audio,
    Post,
    Reel,
    Story,
    Profile,
    Igtv,
    Unknown,
}

impl ContentType {
    /// What the identifier is called in user-facing errors.
    pub fn identifier_label(self) -> &'static str {
        match self {
            ContentType::Video | ContentType::Audio => "video ID",
            ContentType::Post | ContentType::Reel | ContentType::Igtv => "content ID",
            ContentType::Story | ContentType::Profile => "username",
            ContentType::Unknown => "identifier",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentType::Video => "video",
            ContentType::Audio => "audio",
            ContentType::Post => "post",
            ContentType::Reel => "reel",
            ContentType::Story => "story",
            ContentType::Profile => "profile",
            ContentType::Igtv => "igtv",
            ContentType::Unknown => "unknown",
        })
    }
}

/// Result of matching a URL against a platform's shapes.
///
/// `identifier` may be empty while `valid` is true: the URL had a known
/// shape but nothing usable in the id position. Use
/// [`UrlClassification::require_identifier`] before building on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlClassification {
    pub platform: Platform,
    pub content_type: ContentType,
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub shape: &'static str,
    pub valid: bool,
}

impl UrlClassification {
    pub fn require_identifier(&self) -> Result<&str, ExtractError> {
        if self.identifier.is_empty() {
            return Err(ExtractError::ExtractionFailed {
                platform: self.platform,
                what: self.content_type.identifier_label(),
            });
        }
        Ok(&self.identifier)
    }

    pub fn require_username(&self) -> Result<&str, ExtractError> {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ExtractError::ExtractionFailed {
                platform: self.platform,
                what: "username",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Audio,
    Image,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Format {
    pub id: String,
    pub url: String,
    pub ext: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    pub id: String,
    pub platform: Platform,
    pub content_type: ContentType,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    pub media_type: MediaType,
    pub formats: Vec<Format>,
    pub demo: bool,
}

/// Static description of one fabricated format.
#[derive(Clone, Copy)]
pub(crate) struct FormatSpec {
    pub id: &'static str,
    pub ext: &'static str,
    pub mime_type: &'static str,
    pub quality: &'static str,
    pub height: Option<u32>,
    pub filesize: u64,
}

const MB: u64 = 1024 * 1024;
const KB: u64 = 1024;

impl FormatSpec {
    pub const fn new(
        id: &'static str,
        ext: &'static str,
        mime_type: &'static str,
        quality: &'static str,
    ) -> Self {
        Self {
            id,
            ext,
            mime_type,
            quality,
            height: None,
            filesize: 0,
        }
    }

    pub const fn mb(self, n: u64) -> Self {
        Self {
            filesize: n * MB,
            ..self
        }
    }

    pub const fn kb(self, n: u64) -> Self {
        Self {
            filesize: n * KB,
            ..self
        }
    }

    pub const fn height(self, h: u32) -> Self {
        Self {
            height: Some(h),
            ..self
        }
    }

    pub fn build(&self, links: &DemoLinks, platform: Platform, media_id: &str) -> Format {
        Format {
            id: self.id.to_string(),
            url: links.link(platform, media_id, self.id, self.ext),
            ext: self.ext.to_string(),
            mime_type: self.mime_type.to_string(),
            quality: Some(self.quality.to_string()),
            // 16:9 for sized video, nothing for audio and photos
            width: self.height.map(|h| h * 16 / 9),
            height: self.height,
            filesize: Some(self.filesize),
            watermark: None,
        }
    }
}

pub(crate) fn build_formats(
    specs: &[FormatSpec],
    links: &DemoLinks,
    platform: Platform,
    media_id: &str,
) -> Vec<Format> {
    specs
        .iter()
        .map(|spec| spec.build(links, platform, media_id))
        .collect()
}
