//! Fabricated download links and the text files served behind them.

use chrono::{DateTime, Local};

use crate::extractor::Platform;

const APP_NAME: &str = "Media Downloader Pro";

/// Builds links into this service's `/demo` route.
#[derive(Debug, Clone)]
pub struct DemoLinks {
    base: String,
}

impl DemoLinks {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn link(&self, platform: Platform, media_id: &str, format_id: &str, ext: &str) -> String {
        self.file_link(platform, media_id, &format!("{}.{}", format_id, ext))
    }

    pub fn file_link(&self, platform: Platform, media_id: &str, file: &str) -> String {
        format!(
            "{}/demo/{}/{}/{}",
            self.base,
            platform.slug(),
            urlencoding::encode(media_id),
            urlencoding::encode(file)
        )
    }
}

/// A plain-text stand-in for a media file.
#[derive(Debug, Clone)]
pub struct DemoFile {
    pub filename: String,
    pub body: String,
}

impl DemoFile {
    pub fn new(source_url: &str, filename: &str, at: DateTime<Local>) -> Self {
        let body = format!(
            "This is a demo download from {}\n\n\
             Original URL: {}\n\
             Filename: {}\n\
             Downloaded at: {}\n\n\
             Note: This is a demonstration. In a real implementation, this would be the actual media file.",
            APP_NAME,
            source_url,
            filename,
            at.format("%Y-%m-%d %H:%M:%S"),
        );

        Self {
            filename: demo_filename(filename),
            body,
        }
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// `clip.mp4` becomes `demo-clip.txt`.
fn demo_filename(filename: &str) -> String {
    let name = filename.rsplit('/').next().unwrap_or(filename);
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    let stem: String = stem
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();
    if stem.is_empty() {
        "demo.txt".to_string()
    } else {
        format!("demo-{}.txt", stem)
    }
}
