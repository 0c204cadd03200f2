use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::types::{ContentType, ExtractError, Platform, UrlClassification};
use super::Subject;

/// Which flavour of payload a download endpoint asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Auto,
    Video,
    Audio,
    Profile,
    Post,
    Reel,
    Story,
    Music,
}

impl Kind {
    const ALL: [Kind; 8] = [
        Kind::Auto,
        Kind::Video,
        Kind::Audio,
        Kind::Profile,
        Kind::Post,
        Kind::Reel,
        Kind::Story,
        Kind::Music,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Auto => "auto",
            Kind::Video => "video",
            Kind::Audio => "audio",
            Kind::Profile => "profile",
            Kind::Post => "post",
            Kind::Reel => "reel",
            Kind::Story => "story",
            Kind::Music => "music",
        }
    }
}

impl FromStr for Kind {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ExtractError::UnsupportedTarget(s.to_string()))
    }
}

/// One download endpoint: a platform plus the payload kind it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub platform: Platform,
    pub kind: Kind,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform.slug(), self.kind.as_str())
    }
}

impl Target {
    pub fn auto(platform: Platform) -> Self {
        Self {
            platform,
            kind: Kind::Auto,
        }
    }

    pub fn new(platform: Platform, kind: Kind) -> Result<Self, ExtractError> {
        let supported = matches!(
            (platform, kind),
            (_, Kind::Auto)
                | (Platform::YouTube, Kind::Video | Kind::Audio)
                | (Platform::TikTok, Kind::Video | Kind::Profile)
                | (
                    Platform::Instagram,
                    Kind::Post | Kind::Reel | Kind::Story | Kind::Profile | Kind::Music
                )
        );
        if !supported {
            return Err(ExtractError::UnsupportedTarget(format!(
                "{}/{}",
                platform.slug(),
                kind.as_str()
            )));
        }
        Ok(Self { platform, kind })
    }

    pub fn parse(platform: &str, kind: &str) -> Result<Self, ExtractError> {
        Self::new(platform.parse()?, kind.parse()?)
    }

    /// Whether a URL of this content type may be served by this endpoint.
    pub fn accepts(&self, content_type: ContentType) -> bool {
        use ContentType as C;
        match (self.platform, self.kind) {
            (_, Kind::Auto) => true,
            (Platform::YouTube, _) => matches!(content_type, C::Video | C::Audio),
            (Platform::TikTok, Kind::Video) => content_type == C::Video,
            (Platform::TikTok, _) => true,
            (Platform::Instagram, Kind::Post) => content_type == C::Post,
            (Platform::Instagram, Kind::Reel) => matches!(content_type, C::Reel | C::Post),
            (Platform::Instagram, Kind::Story | Kind::Profile) => {
                matches!(content_type, C::Story | C::Profile)
            }
            (Platform::Instagram, _) => true,
        }
    }

    /// Content type of the payload this endpoint fabricates.
    pub fn payload_type(&self, content_type: ContentType) -> ContentType {
        match self.kind {
            Kind::Auto => content_type,
            Kind::Video => ContentType::Video,
            Kind::Audio | Kind::Music => ContentType::Audio,
            Kind::Profile => ContentType::Profile,
            Kind::Post => ContentType::Post,
            Kind::Reel => ContentType::Reel,
            Kind::Story => ContentType::Story,
        }
    }

    /// Pick the identifier the payload is built around.
    pub(crate) fn subject<'a>(
        &self,
        c: &'a UrlClassification,
    ) -> Result<Subject<'a>, ExtractError> {
        let content_type = self.payload_type(c.content_type);
        let id = match self.kind {
            Kind::Profile => c.require_username()?,
            // music payloads get a fresh id; any Instagram shape will do
            Kind::Music => c.identifier.as_str(),
            _ => c.require_identifier()?,
        };
        Ok(Subject {
            id,
            username: c.username.as_deref(),
            content_type,
        })
    }

    /// Simulated processing time for this endpoint.
    pub fn delay(&self) -> Duration {
        let millis = match (self.platform, self.kind) {
            (_, Kind::Auto) => 0,
            (Platform::YouTube, Kind::Video) => 2000,
            (Platform::YouTube, _) => 1500,
            (Platform::TikTok, Kind::Video) => 1800,
            (Platform::TikTok, _) => 1200,
            (Platform::Instagram, Kind::Post) => 1500,
            (Platform::Instagram, Kind::Reel) => 2000,
            (Platform::Instagram, Kind::Story) => 1800,
            (Platform::Instagram, Kind::Profile) => 1200,
            (Platform::Instagram, _) => 1600,
        };
        Duration::from_millis(millis)
    }
}
