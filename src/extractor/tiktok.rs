use super::rules::{nth_segment_after, segment_after, Identifiers, Rule};
use super::types::*;
use super::Subject;
use crate::demo::DemoLinks;
use std::sync::LazyLock;

const THUMBNAIL_URL: &str =
    "https://p16-sign-va.tiktokcdn.com/obj/tos-maliva-p-0068/oEGNkZDAJlB8zAeQjQFmGBYWfCMYf9bBANFz7C";

// `@user` rules come first: any URL naming an account keeps its username,
// and one without a whole `/video/<digits>` segment is a profile.
pub(crate) static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "user-video",
            r"^(?:https?://)?(?:www\.|m\.)?tiktok\.com/@[\w.-]+/video/\d+(?:[/?&#]|$)",
            ContentType::Video,
            |url| {
                Identifiers::id(segment_after(url, "/video/"))
                    .with_username(segment_after(url, "@"))
            },
        ),
        Rule::new(
            "profile",
            r"^(?:https?://)?(?:www\.|m\.|vm\.|vt\.)?tiktok\.com/@",
            ContentType::Profile,
            |url| {
                let username = segment_after(url, "@");
                Identifiers::id(username.clone()).with_username(username)
            },
        ),
        Rule::new(
            "bare-video",
            r"^(?:https?://)?(?:www\.|m\.)?tiktok\.com/video/\d+(?:[/?&#]|$)",
            ContentType::Video,
            |url| Identifiers::id(segment_after(url, "/video/")),
        ),
        Rule::new(
            "legacy-user-video",
            r"^(?:https?://)?(?:www\.|m\.)?tiktok\.com/[\w.-]+/video/\d+(?:[/?&#]|$)",
            ContentType::Video,
            |url| {
                Identifiers::id(segment_after(url, "/video/"))
                    .with_username(nth_segment_after(url, "tiktok.com/", 0))
            },
        ),
        Rule::new(
            "vm-short",
            r"^(?:https?://)?vm\.tiktok\.com/[\w.-]+",
            ContentType::Video,
            |url| Identifiers::id(segment_after(url, "vm.tiktok.com/")),
        ),
        Rule::new(
            "vt-short",
            r"^(?:https?://)?vt\.tiktok\.com/[\w.-]+",
            ContentType::Video,
            |url| Identifiers::id(segment_after(url, "vt.tiktok.com/")),
        ),
        Rule::new(
            "t-short",
            r"^(?:https?://)?(?:www\.|m\.)?tiktok\.com/t/[\w.-]+",
            ContentType::Video,
            |url| Identifiers::id(segment_after(url, "tiktok.com/t/")),
        ),
        Rule::new(
            "v-direct",
            r"^(?:https?://)?(?:www\.|m\.)?tiktok\.com/v/[\w.-]+",
            ContentType::Video,
            |url| Identifiers::id(segment_after(url, "tiktok.com/v/")),
        ),
    ]
});

const VIDEO_FORMATS: [FormatSpec; 3] = [
    FormatSpec::new("hd", "mp4", "video/mp4", "HD Video (No Watermark)").mb(8),
    FormatSpec::new("sd", "mp4", "video/mp4", "SD Video (No Watermark)").mb(4),
    FormatSpec::new("audio", "mp3", "audio/mpeg", "Original Audio MP3").mb(2),
];

const PROFILE_FORMATS: [FormatSpec; 2] = [
    FormatSpec::new("original", "jpg", "image/jpeg", "Original").kb(2560),
    FormatSpec::new("hd", "png", "image/png", "HD").kb(4198),
];

pub struct TiktokExtractor;

impl TiktokExtractor {
    /// Check if URL has any known TikTok shape
    pub fn matches(url: &str) -> bool {
        super::rules::first_match(&RULES, url).is_some()
    }

    pub(crate) fn fabricate(subject: &Subject<'_>, links: &DemoLinks) -> MediaInfo {
        if subject.content_type == ContentType::Profile {
            return Self::profile(subject.id, links);
        }

        let id = subject.id;
        let mut formats = build_formats(&VIDEO_FORMATS, links, Platform::TikTok, id);
        for format in formats.iter_mut().filter(|f| f.mime_type.starts_with("video/")) {
            format.watermark = Some(false);
        }

        MediaInfo {
            id: id.to_string(),
            platform: Platform::TikTok,
            content_type: ContentType::Video,
            title: format!("TikTok Video by @{}", subject.username.unwrap_or("creator")),
            author: subject.username.unwrap_or("TikTok Creator").to_string(),
            description: Some("TikTok video without watermark".to_string()),
            thumbnail: Some(THUMBNAIL_URL.to_string()),
            duration: Some(15),
            media_type: MediaType::Video,
            formats,
            demo: true,
        }
    }

    fn profile(username: &str, links: &DemoLinks) -> MediaInfo {
        MediaInfo {
            id: username.to_string(),
            platform: Platform::TikTok,
            content_type: ContentType::Profile,
            title: format!("Profile picture @{}", username),
            author: format!("@{}", username),
            description: Some(format!("HD profile picture of TikTok user @{}", username)),
            thumbnail: Some(format!("{}?user_id={}", THUMBNAIL_URL, urlencoding::encode(username))),
            duration: None,
            media_type: MediaType::Image,
            formats: build_formats(&PROFILE_FORMATS, links, Platform::TikTok, username),
            demo: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{classify, Platform};
    use super::*;

    #[test]
    fn canonical_video_keeps_username() {
        let c = classify("https://www.tiktok.com/@user123/video/7123456789", Platform::TikTok)
            .unwrap();
        assert_eq!(c.content_type, ContentType::Video);
        assert_eq!(c.identifier, "7123456789");
        assert_eq!(c.username.as_deref(), Some("user123"));
    }

    #[test]
    fn at_without_video_downgrades_to_profile() {
        for url in [
            "https://www.tiktok.com/@some.user",
            "https://www.tiktok.com/@some.user/",
            "https://m.tiktok.com/@some.user?lang=en",
            "https://vm.tiktok.com/@some.user",
            "https://www.tiktok.com/@some.user/video/",
            "https://www.tiktok.com/@some.user/video/123abc",
        ] {
            let c = classify(url, Platform::TikTok).unwrap();
            assert_eq!(c.content_type, ContentType::Profile, "{url}");
            assert_eq!(c.identifier, "some.user", "{url}");
            assert_eq!(c.username.as_deref(), Some("some.user"), "{url}");
        }
    }

    #[test]
    fn video_id_must_be_a_whole_digit_segment() {
        for url in [
            "https://www.tiktok.com/@user123/video/7123456789/",
            "https://www.tiktok.com/@user123/video/7123456789?is_from_webapp=1",
            "https://www.tiktok.com/@user123/video/7123456789#comments",
        ] {
            let c = classify(url, Platform::TikTok).unwrap();
            assert_eq!(c.shape, "user-video", "{url}");
            assert_eq!(c.identifier, "7123456789", "{url}");
        }
        assert!(classify("https://www.tiktok.com/video/12ab", Platform::TikTok).is_err());
    }

    #[test]
    fn short_and_direct_links() {
        let cases = [
            ("https://vm.tiktok.com/ZMabc123/", "ZMabc123", "vm-short"),
            ("https://vt.tiktok.com/ZSxyz789", "ZSxyz789", "vt-short"),
            ("https://www.tiktok.com/t/ZT8abc/", "ZT8abc", "t-short"),
            ("https://www.tiktok.com/v/6800000000000.html?x=1", "6800000000000.html", "v-direct"),
            ("tiktok.com/video/7000000000000", "7000000000000", "bare-video"),
            ("https://m.tiktok.com/someone/video/7111111111111", "7111111111111", "legacy-user-video"),
        ];
        for (url, id, shape) in cases {
            let c = classify(url, Platform::TikTok).unwrap();
            assert_eq!(c.content_type, ContentType::Video, "{url}");
            assert_eq!(c.identifier, id, "{url}");
            assert_eq!(c.shape, shape, "{url}");
        }
    }

    #[test]
    fn legacy_path_username_is_recovered() {
        let c = classify("https://m.tiktok.com/someone/video/7111111111111", Platform::TikTok)
            .unwrap();
        assert_eq!(c.username.as_deref(), Some("someone"));
    }

    #[test]
    fn bare_at_is_extraction_failure() {
        let c = classify("https://www.tiktok.com/@", Platform::TikTok).unwrap();
        assert!(c.valid);
        assert_eq!(
            c.require_identifier().unwrap_err().to_string(),
            "Could not extract username from URL"
        );
    }

    #[test]
    fn rejects_non_tiktok() {
        for url in [
            "https://www.tiktok.com/",
            "https://www.tiktok.com/explore",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://tiktok.example.com/@user",
        ] {
            let err = classify(url, Platform::TikTok).unwrap_err();
            assert_eq!(err.to_string(), "Invalid TikTok URL", "{url}");
        }
    }

    #[test]
    fn video_formats_are_watermark_free() {
        let links = DemoLinks::new("http://localhost:3000");
        let subject = Subject {
            id: "7123456789",
            username: Some("user123"),
            content_type: ContentType::Video,
        };
        let info = TiktokExtractor::fabricate(&subject, &links);
        assert_eq!(info.title, "TikTok Video by @user123");
        assert_eq!(info.formats[0].watermark, Some(false));
        assert_eq!(info.formats[2].watermark, None);
    }

    #[test]
    fn profile_payload_is_an_image() {
        let links = DemoLinks::new("http://localhost:3000");
        let subject = Subject {
            id: "user123",
            username: Some("user123"),
            content_type: ContentType::Profile,
        };
        let info = TiktokExtractor::fabricate(&subject, &links);
        assert_eq!(info.media_type, MediaType::Image);
        assert_eq!(info.author, "@user123");
        assert_eq!(info.formats.len(), 2);
    }
}
