use super::rules::{nth_segment_after, segment_after, Identifiers, Rule};
use super::types::*;
use super::Subject;
use crate::demo::DemoLinks;
use std::sync::LazyLock;
use uuid::Uuid;

const THUMBNAIL_URL: &str =
    "https://instagram.flhr4-1.fna.fbcdn.net/v/t51.2885-15/123456789_123456789012345_1234567890123456789_n.jpg";

/// First path segments that are Instagram routes, never usernames.
const RESERVED_PATHS: &[&str] = &[
    "p", "reel", "reels", "tv", "stories", "s", "explore", "accounts", "direct",
];

// Most specific shapes first: content paths, then `user/<section>`, then a
// bare `instagram.com/user`.
pub(crate) static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "post",
            r"^(?:https?://)?(?:www\.)?instagram\.com/p/[\w.-]+",
            ContentType::Post,
            |url| Identifiers::id(segment_after(url, "/p/")),
        ),
        Rule::new(
            "reel",
            r"^(?:https?://)?(?:www\.)?instagram\.com/reel/[\w.-]+",
            ContentType::Reel,
            |url| Identifiers::id(segment_after(url, "/reel/")),
        ),
        Rule::new(
            "igtv",
            r"^(?:https?://)?(?:www\.)?instagram\.com/tv/[\w.-]+",
            ContentType::Igtv,
            |url| Identifiers::id(segment_after(url, "/tv/")),
        ),
        Rule::new(
            "stories",
            r"^(?:https?://)?(?:www\.)?instagram\.com/stories/[\w.-]+",
            ContentType::Story,
            |url| user_identifiers(nth_segment_after(url, "/stories/", 0)),
        ),
        Rule::new(
            "story-share",
            r"^(?:https?://)?(?:www\.)?instagram\.com/s/[\w.-]+",
            ContentType::Story,
            |url| Identifiers::id(segment_after(url, "/s/")),
        ),
        Rule::new(
            "user-stories",
            r"^(?:https?://)?(?:www\.)?instagram\.com/[\w.-]+/stories(?:[/?#]|$)",
            ContentType::Story,
            |url| user_identifiers(nth_segment_after(url, "instagram.com/", 0)),
        ),
        Rule::new(
            "user-profile",
            r"^(?:https?://)?(?:www\.)?instagram\.com/[\w.-]+/profile(?:[/?#]|$)",
            ContentType::Profile,
            |url| user_identifiers(nth_segment_after(url, "instagram.com/", 0)),
        ),
        Rule::new(
            "short-post",
            r"^(?:https?://)?(?:www\.)?instagr\.am/p/[\w.-]+",
            ContentType::Post,
            |url| Identifiers::id(segment_after(url, "/p/")),
        ),
        Rule::new(
            "short-profile",
            r"^(?:https?://)?(?:www\.)?instagr\.am/[\w.-]+",
            ContentType::Profile,
            |url| user_identifiers(nth_segment_after(url, "instagr.am/", 0)),
        ),
        Rule::new(
            "profile",
            r"^(?:https?://)?(?:www\.)?instagram\.com/[\w.-]+/?(?:[?#].*)?$",
            ContentType::Profile,
            |url| user_identifiers(nth_segment_after(url, "instagram.com/", 0)),
        ),
    ]
});

fn user_identifiers(username: String) -> Identifiers {
    if RESERVED_PATHS.contains(&username.as_str()) {
        return Identifiers::default();
    }
    Identifiers::id(username.clone()).with_username(username)
}

fn generated_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

const POST_FORMATS: [FormatSpec; 2] = [
    FormatSpec::new("hd", "jpg", "image/jpeg", "Original Photo (HD)").mb(2),
    FormatSpec::new("compressed", "jpg", "image/jpeg", "Compressed Photo").kb(800),
];

const REEL_FORMATS: [FormatSpec; 4] = [
    FormatSpec::new("1080p", "mp4", "video/mp4", "HD Reel (1080p)").mb(15),
    FormatSpec::new("720p", "mp4", "video/mp4", "SD Reel (720p)").mb(8),
    FormatSpec::new("480p", "mp4", "video/mp4", "480p").mb(4),
    FormatSpec::new("audio", "mp3", "audio/mpeg", "Audio Only").mb(2),
];

const STORY_FORMATS: [FormatSpec; 1] =
    [FormatSpec::new("hd", "mp4", "video/mp4", "Story Photo/Video (HD)").kb(6963)];

const PROFILE_FORMATS: [FormatSpec; 2] = [
    FormatSpec::new("hd", "jpg", "image/jpeg", "Profile Picture HD").kb(500),
    FormatSpec::new("sd", "jpg", "image/jpeg", "Profile Picture SD").kb(200),
];

const MUSIC_FORMATS: [FormatSpec; 3] = [
    FormatSpec::new("128kbps", "mp3", "audio/mpeg", "128kbps").kb(2867),
    FormatSpec::new("320kbps", "mp3", "audio/mpeg", "320kbps").kb(6554),
    FormatSpec::new("m4a", "m4a", "audio/mp4", "High").kb(4198),
];

pub struct InstagramExtractor;

impl InstagramExtractor {
    /// Check if URL has any known Instagram shape
    pub fn matches(url: &str) -> bool {
        super::rules::first_match(&RULES, url).is_some()
    }

    pub(crate) fn fabricate(subject: &Subject<'_>, links: &DemoLinks) -> MediaInfo {
        let author = subject.username.unwrap_or("Instagram User").to_string();
        let handle = subject.username.unwrap_or("user");

        let (id, title, description, duration, media_type, specs): (
            String,
            String,
            &str,
            Option<u64>,
            MediaType,
            &[FormatSpec],
        ) = match subject.content_type {
            ContentType::Post => (
                subject.id.to_string(),
                format!("Instagram Post {}", subject.id),
                "Instagram photo post in high quality",
                None,
                MediaType::Image,
                &POST_FORMATS,
            ),
            ContentType::Reel => (
                subject.id.to_string(),
                format!("Instagram Reel {}", subject.id),
                "Instagram Reel in HD",
                Some(30),
                MediaType::Video,
                &REEL_FORMATS,
            ),
            ContentType::Igtv => (
                subject.id.to_string(),
                format!("IGTV Video {}", subject.id),
                "Long-form video from IGTV",
                Some(600),
                MediaType::Video,
                &REEL_FORMATS,
            ),
            ContentType::Story => {
                // Stories addressed by username have no id of their own.
                let id = match subject.username {
                    Some(_) => generated_id(),
                    None => subject.id.to_string(),
                };
                (
                    id,
                    format!("Instagram Story by @{}", handle),
                    "Instagram Story",
                    Some(15),
                    MediaType::Video,
                    &STORY_FORMATS,
                )
            }
            ContentType::Profile => (
                subject.id.to_string(),
                format!("Instagram Profile: @{}", handle),
                "Instagram profile picture",
                None,
                MediaType::Image,
                &PROFILE_FORMATS,
            ),
            ContentType::Audio => {
                let id = generated_id();
                (
                    id.clone(),
                    format!("Instagram Music {}", id),
                    "Popular audio from Instagram Reels",
                    Some(165),
                    MediaType::Audio,
                    &MUSIC_FORMATS,
                )
            }
            ContentType::Video | ContentType::Unknown => (
                subject.id.to_string(),
                "Instagram Content".to_string(),
                "Instagram content",
                None,
                MediaType::Video,
                &[],
            ),
        };

        MediaInfo {
            formats: build_formats(specs, links, Platform::Instagram, &id),
            id,
            platform: Platform::Instagram,
            content_type: subject.content_type,
            title,
            author,
            description: Some(description.to_string()),
            thumbnail: Some(THUMBNAIL_URL.to_string()),
            duration,
            media_type,
            demo: true,
        }
    }
}
