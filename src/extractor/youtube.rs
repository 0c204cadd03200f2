use super::rules::{query_value, segment_after, Identifiers, Rule};
use super::types::*;
use super::Subject;
use crate::demo::DemoLinks;
use std::sync::LazyLock;

pub(crate) static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            "music-watch",
            r"^(?:https?://)?music\.youtube\.com/watch\?(?:[^#]*&)?v=",
            ContentType::Audio,
            video_param,
        ),
        Rule::new(
            "music-playlist",
            r"^(?:https?://)?music\.youtube\.com/playlist\?list=",
            ContentType::Audio,
            video_param,
        ),
        Rule::new(
            "mobile-watch",
            r"^(?:https?://)?m\.youtube\.com/watch\?(?:[^#]*&)?v=",
            ContentType::Video,
            video_param,
        ),
        Rule::new(
            "watch",
            r"^(?:https?://)?(?:www\.)?youtube\.com/watch\?(?:[^#]*&)?v=",
            ContentType::Video,
            video_param,
        ),
        Rule::new(
            "short-link",
            r"^(?:https?://)?(?:www\.)?youtu\.be/",
            ContentType::Video,
            |url| Identifiers::id(segment_after(url, "youtu.be/")),
        ),
        Rule::new(
            "embed",
            r"^(?:https?://)?(?:www\.)?youtube\.com/embed/",
            ContentType::Video,
            |url| Identifiers::id(segment_after(url, "/embed/")),
        ),
        Rule::new(
            "legacy-v",
            r"^(?:https?://)?(?:www\.)?youtube\.com/v/",
            ContentType::Video,
            |url| Identifiers::id(segment_after(url, "/v/")),
        ),
        Rule::new(
            "shorts",
            r"^(?:https?://)?(?:www\.)?youtube\.com/shorts/",
            ContentType::Video,
            |url| Identifiers::id(segment_after(url, "/shorts/")),
        ),
        Rule::new(
            "live",
            r"^(?:https?://)?(?:www\.)?youtube\.com/live/",
            ContentType::Video,
            |url| Identifiers::id(segment_after(url, "/live/")),
        ),
    ]
});

fn video_param(url: &str) -> Identifiers {
    Identifiers::id(query_value(url, "v"))
}

const VIDEO_FORMATS: [FormatSpec; 5] = [
    FormatSpec::new("1080p", "mp4", "video/mp4", "1080p (Full HD)").height(1080).mb(50),
    FormatSpec::new("720p", "mp4", "video/mp4", "720p (HD)").height(720).mb(25),
    FormatSpec::new("480p", "mp4", "video/mp4", "480p (SD)").height(480).mb(15),
    FormatSpec::new("360p", "mp4", "video/mp4", "360p (SD)").height(360).mb(8),
    FormatSpec::new("mp3", "mp3", "audio/mpeg", "MP3 Audio").mb(5),
];

const AUDIO_FORMATS: [FormatSpec; 4] = [
    FormatSpec::new("128kbps", "mp3", "audio/mpeg", "128kbps").kb(3584),
    FormatSpec::new("192kbps", "mp3", "audio/mpeg", "192kbps").kb(5325),
    FormatSpec::new("320kbps", "mp3", "audio/mpeg", "320kbps").kb(8909),
    FormatSpec::new("m4a", "m4a", "audio/mp4", "High").kb(6246),
];

pub struct YoutubeExtractor;

impl YoutubeExtractor {
    /// Check if URL has any known YouTube shape
    pub fn matches(url: &str) -> bool {
        super::rules::first_match(&RULES, url).is_some()
    }

    pub(crate) fn fabricate(subject: &Subject<'_>, links: &DemoLinks) -> MediaInfo {
        let id = subject.id;
        let audio_only = subject.content_type == ContentType::Audio;

        let (title, description, media_type, specs): (String, &str, MediaType, &[FormatSpec]) =
            if audio_only {
                (
                    format!("Audio YouTube {}", id),
                    "Audio extracted from a YouTube video",
                    MediaType::Audio,
                    &AUDIO_FORMATS,
                )
            } else {
                (
                    format!("YouTube Video {}", id),
                    "Video processed from YouTube",
                    MediaType::Video,
                    &VIDEO_FORMATS,
                )
            };

        MediaInfo {
            id: id.to_string(),
            platform: Platform::YouTube,
            content_type: subject.content_type,
            title,
            author: "YouTube User".to_string(),
            description: Some(description.to_string()),
            thumbnail: Some(format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", id)),
            duration: Some(225),
            media_type,
            formats: build_formats(specs, links, Platform::YouTube, id),
            demo: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{classify, Platform};
    use super::*;

    fn check(url: &str, content_type: ContentType, id: &str) {
        let c = classify(url, Platform::YouTube).unwrap();
        assert!(c.valid, "{url}");
        assert_eq!(c.content_type, content_type, "{url}");
        assert_eq!(c.identifier, id, "{url}");
    }

    #[test]
    fn recognises_every_shape() {
        check("https://www.youtube.com/watch?v=dQw4w9WgXcQ", ContentType::Video, "dQw4w9WgXcQ");
        check("youtube.com/watch?v=dQw4w9WgXcQ&t=42s", ContentType::Video, "dQw4w9WgXcQ");
        check(
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            ContentType::Video,
            "dQw4w9WgXcQ",
        );
        check("https://youtu.be/dQw4w9WgXcQ", ContentType::Video, "dQw4w9WgXcQ");
        check("https://youtu.be/dQw4w9WgXcQ?si=abc", ContentType::Video, "dQw4w9WgXcQ");
        check("https://www.youtube.com/embed/dQw4w9WgXcQ", ContentType::Video, "dQw4w9WgXcQ");
        check("https://www.youtube.com/v/dQw4w9WgXcQ?version=3", ContentType::Video, "dQw4w9WgXcQ");
        check("https://youtube.com/shorts/abcdEFGhij0/", ContentType::Video, "abcdEFGhij0");
        check("https://www.youtube.com/live/liveID12345", ContentType::Video, "liveID12345");
        check("https://m.youtube.com/watch?v=mobile12345", ContentType::Video, "mobile12345");
        check("https://music.youtube.com/watch?v=song1234567&list=RD", ContentType::Audio, "song1234567");
    }

    #[test]
    fn playlist_matches_but_has_no_video_id() {
        let c = classify("https://music.youtube.com/playlist?list=PLabc", Platform::YouTube).unwrap();
        assert!(c.valid);
        assert_eq!(c.shape, "music-playlist");
        assert_eq!(c.identifier, "");
        assert_eq!(
            c.require_identifier().unwrap_err().to_string(),
            "Could not extract video ID from URL"
        );
    }

    #[test]
    fn empty_short_link_is_extraction_failure_not_rejection() {
        let c = classify("https://youtu.be/", Platform::YouTube).unwrap();
        assert!(c.valid);
        assert!(c.require_identifier().is_err());
    }

    #[test]
    fn rejects_foreign_and_bare_urls() {
        for url in [
            "https://example.com/not-a-video",
            "https://www.youtube.com/",
            "https://www.youtube.com/channel/UCxyz",
            "https://www.youtube.com/watch",
            "ftp://youtube.com/watch?v=abc",
            "https://notyoutube.com/watch?v=abc",
        ] {
            let err = classify(url, Platform::YouTube).unwrap_err();
            assert_eq!(err.to_string(), "Invalid YouTube URL", "{url}");
        }
    }

    #[test]
    fn audio_payload_uses_audio_formats() {
        let links = DemoLinks::new("http://localhost:3000");
        let subject = Subject {
            id: "abc",
            username: None,
            content_type: ContentType::Audio,
        };
        let info = YoutubeExtractor::fabricate(&subject, &links);
        assert_eq!(info.media_type, MediaType::Audio);
        assert_eq!(info.formats.len(), 4);
        assert!(info.formats.iter().all(|f| f.mime_type.starts_with("audio/")));
        assert_eq!(
            info.formats[0].url,
            "http://localhost:3000/demo/youtube/abc/128kbps.mp3"
        );
    }

    #[test]
    fn video_payload_carries_thumbnail_and_sizes() {
        let links = DemoLinks::new("http://localhost:3000/");
        let subject = Subject {
            id: "dQw4w9WgXcQ",
            username: None,
            content_type: ContentType::Video,
        };
        let info = YoutubeExtractor::fabricate(&subject, &links);
        assert_eq!(
            info.thumbnail.as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg")
        );
        assert_eq!(info.formats[0].height, Some(1080));
        assert_eq!(info.formats[0].width, Some(1920));
        assert_eq!(info.formats[0].filesize, Some(50 * 1024 * 1024));
        assert!(info.demo);
    }
}
