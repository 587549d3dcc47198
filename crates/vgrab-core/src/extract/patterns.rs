//! Compiled extraction patterns, shared between the HTML passes and the
//! network-response observer.

use regex::Regex;
use std::sync::OnceLock;

/// The four extraction patterns, compiled once per process.
pub struct ExtractPatterns {
    /// Instagram CDN media hosts (`scontent.` / `video.cdninstagram.com`).
    pub cdn_host: Regex,
    /// Any http(s) URL ending in `.mp4`, optional query string.
    pub generic_mp4: Regex,
    /// `src` attribute of `<video>` tags.
    pub video_tag: Regex,
    /// `src` attribute of `<source>` tags.
    pub source_tag: Regex,
}

impl ExtractPatterns {
    fn new() -> Self {
        // Patterns are fixed literals; compilation cannot fail at runtime.
        Self {
            cdn_host: Regex::new(r#"(?i)https://(?:scontent|video)\.cdninstagram\.com/[^"'\\\s]+"#)
                .expect("cdn_host pattern"),
            generic_mp4: Regex::new(r#"(?i)https?://[^\s"']+\.mp4(?:\?[^\s"']+)?"#)
                .expect("generic_mp4 pattern"),
            video_tag: Regex::new(r#"(?i)<video[^>]+src=["']([^"']+)["']"#)
                .expect("video_tag pattern"),
            source_tag: Regex::new(r#"(?i)<source[^>]+src=["']([^"']+)["']"#)
                .expect("source_tag pattern"),
        }
    }

    /// True if a network response URL looks like video media worth harvesting.
    pub fn is_media_url(&self, url: &str) -> bool {
        self.cdn_host.is_match(url) || self.generic_mp4.is_match(url)
    }
}

/// Process-wide pattern set.
pub fn patterns() -> &'static ExtractPatterns {
    static PATTERNS: OnceLock<ExtractPatterns> = OnceLock::new();
    PATTERNS.get_or_init(ExtractPatterns::new)
}
