mod instagram;
mod rules;
mod target;
mod tiktok;
mod types;
mod youtube;

pub use instagram::InstagramExtractor;
pub use target::{Kind, Target};
pub use tiktok::TiktokExtractor;
pub use types::*;
pub use youtube::YoutubeExtractor;

use crate::demo::DemoLinks;
use rules::Rule;

/// What a fabricated payload is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Subject<'a> {
    pub id: &'a str,
    pub username: Option<&'a str>,
    pub content_type: ContentType,
}

fn rules_for(platform: Platform) -> &'static [Rule] {
    match platform {
        Platform::YouTube => &youtube::RULES,
        Platform::TikTok => &tiktok::RULES,
        Platform::Instagram => &instagram::RULES,
    }
}

/// Classify a URL against one platform's shapes.
pub fn classify(url: &str, platform: Platform) -> Result<UrlClassification, ExtractError> {
    let url = url.trim();
    let invalid = || ExtractError::InvalidUrl {
        platform: Some(platform),
        url: url.to_string(),
    };
    if url.is_empty() {
        return Err(invalid());
    }

    let rule = rules::first_match(rules_for(platform), url).ok_or_else(invalid)?;
    let ids = (rule.extract)(url);

    tracing::debug!(
        platform = platform.slug(),
        shape = rule.shape,
        identifier = %ids.id,
        "classified url"
    );

    Ok(UrlClassification {
        platform,
        content_type: rule.content_type,
        identifier: ids.id,
        username: ids.username,
        shape: rule.shape,
        valid: true,
    })
}

/// Guess which platform owns a URL from its shape alone.
pub fn detect_platform(url: &str) -> Option<Platform> {
    let url = url.trim();

    if YoutubeExtractor::matches(url) {
        return Some(Platform::YouTube);
    }
    if TiktokExtractor::matches(url) {
        return Some(Platform::TikTok);
    }
    if InstagramExtractor::matches(url) {
        return Some(Platform::Instagram);
    }

    None
}

/// Classify a URL without a platform hint: YouTube, then TikTok, then
/// Instagram. The first platform with a matching shape wins.
pub fn classify_any(url: &str) -> Result<UrlClassification, ExtractError> {
    match detect_platform(url) {
        Some(platform) => classify(url, platform),
        None => Err(ExtractError::InvalidUrl {
            platform: None,
            url: url.trim().to_string(),
        }),
    }
}

/// Build the mock media payload a download endpoint answers with.
pub fn extract_media(
    url: &str,
    target: Target,
    links: &DemoLinks,
) -> Result<MediaInfo, ExtractError> {
    if url.trim().is_empty() {
        return Err(ExtractError::MissingUrl);
    }

    let classification = classify(url, target.platform)?;
    if !target.accepts(classification.content_type) {
        tracing::debug!(
            %target,
            content_type = %classification.content_type,
            "content type not served by endpoint"
        );
        return Err(ExtractError::InvalidUrl {
            platform: Some(target.platform),
            url: url.trim().to_string(),
        });
    }

    let subject = target.subject(&classification)?;
    let info = match target.platform {
        Platform::YouTube => YoutubeExtractor::fabricate(&subject, links),
        Platform::TikTok => TiktokExtractor::fabricate(&subject, links),
        Platform::Instagram => InstagramExtractor::fabricate(&subject, links),
    };
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> DemoLinks {
        DemoLinks::new("http://localhost:3000")
    }

    #[test]
    fn classify_is_idempotent() {
        for url in [
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.tiktok.com/@user123/video/7123456789",
            "https://instagram.com/p/ABC123/",
            "https://example.com/not-a-video",
        ] {
            for platform in Platform::ALL {
                assert_eq!(classify(url, platform), classify(url, platform));
            }
        }
    }

    #[test]
    fn unmatched_urls_are_invalid_everywhere() {
        for url in ["https://example.com/not-a-video", "not a url", "", "   "] {
            for platform in Platform::ALL {
                assert!(matches!(
                    classify(url, platform),
                    Err(ExtractError::InvalidUrl { .. })
                ));
            }
            assert_eq!(classify_any(url).unwrap_err().to_string(), "Unsupported URL");
        }
    }

    #[test]
    fn inference_picks_owning_platform() {
        let c = classify_any("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(c.platform, Platform::YouTube);
        let c = classify_any("https://vm.tiktok.com/ZMabc/").unwrap();
        assert_eq!(c.platform, Platform::TikTok);
        let c = classify_any("  https://instagram.com/p/ABC123/  ").unwrap();
        assert_eq!(c.platform, Platform::Instagram);
        assert_eq!(c.identifier, "ABC123");
    }

    #[test]
    fn detection_follows_precedence() {
        assert_eq!(detect_platform("youtube.com/shorts/abc"), Some(Platform::YouTube));
        assert_eq!(detect_platform(" https://www.tiktok.com/@someone "), Some(Platform::TikTok));
        assert_eq!(detect_platform("https://instagr.am/someone"), Some(Platform::Instagram));
        assert_eq!(detect_platform("https://vimeo.com/1"), None);
        assert!(YoutubeExtractor::matches("https://youtu.be/dQw4w9WgXcQ"));
        assert!(!TiktokExtractor::matches("https://youtu.be/dQw4w9WgXcQ"));
        assert!(!InstagramExtractor::matches("https://www.tiktok.com/@someone"));
    }

    #[test]
    fn extraction_failure_surfaces_from_inference() {
        let err = classify_any("https://youtu.be/")
            .and_then(|c| c.require_identifier().map(str::to_string))
            .unwrap_err();
        assert!(matches!(err, ExtractError::ExtractionFailed { .. }));
    }

    #[test]
    fn extract_media_requires_url() {
        let err = extract_media("  ", Target::auto(Platform::YouTube), &links()).unwrap_err();
        assert_eq!(err, ExtractError::MissingUrl);
        assert_eq!(err.to_string(), "URL is required");
    }

    #[test]
    fn extract_media_checks_endpoint_content_type() {
        let post = Target::parse("instagram", "post").unwrap();
        let err = extract_media("https://www.instagram.com/reel/Cxyz/", post, &links()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Instagram URL");

        let info = extract_media("https://www.instagram.com/p/Cxyz/", post, &links()).unwrap();
        assert_eq!(info.content_type, ContentType::Post);
        assert_eq!(info.id, "Cxyz");
    }

    #[test]
    fn extract_media_reports_missing_identifier() {
        let err = extract_media(
            "https://music.youtube.com/playlist?list=PL1",
            Target::auto(Platform::YouTube),
            &links(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Could not extract video ID from URL");
    }

    #[test]
    fn youtube_audio_endpoint_turns_video_into_audio() {
        let target = Target::parse("youtube", "audio").unwrap();
        let info = extract_media("https://youtu.be/dQw4w9WgXcQ", target, &links()).unwrap();
        assert_eq!(info.content_type, ContentType::Audio);
        assert_eq!(info.media_type, MediaType::Audio);
        assert_eq!(info.id, "dQw4w9WgXcQ");
    }

    #[test]
    fn instagram_music_accepts_any_shape() {
        let target = Target::parse("instagram", "music").unwrap();
        let info = extract_media("https://instagram.com/someone", target, &links()).unwrap();
        assert_eq!(info.media_type, MediaType::Audio);
        assert_eq!(info.formats.len(), 3);
    }
}
