//! Blocklist filtering and host-preference ranking of a candidate set.

use super::candidates::CandidateSet;

/// Instagram CDN host promoted to the front in threads.net mode.
const INSTAGRAM_CDN_MARKER: &str = "cdninstagram.com";

/// True for the domain itself or any subdomain of it; a mere suffix match
/// would also accept unrelated hosts like `xthreads.net`.
fn is_host_or_subdomain(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Target-specific ranking mode, detected from the source page's hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteMode {
    /// threads.net targets: Instagram CDN URLs are promoted to the front.
    ThreadsNet,
    /// threads.com targets: first-seen order, no partition.
    ThreadsCom,
    /// Anything else: first-seen order, no partition.
    Generic,
}

impl SiteMode {
    /// Detects the mode from the target page URL's hostname. Unparseable URLs
    /// fall back to generic.
    pub fn detect(target_url: &str) -> Self {
        let host = url::Url::parse(target_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()));
        match host.as_deref() {
            Some(h) if is_host_or_subdomain(h, "threads.net") => SiteMode::ThreadsNet,
            Some(h) if is_host_or_subdomain(h, "threads.com") => SiteMode::ThreadsCom,
            _ => SiteMode::Generic,
        }
    }

    /// Substring identifying the preferred CDN host, if this mode has one.
    fn preferred_host_marker(&self) -> Option<&'static str> {
        match self {
            SiteMode::ThreadsNet => Some(INSTAGRAM_CDN_MARKER),
            SiteMode::ThreadsCom | SiteMode::Generic => None,
        }
    }
}

/// The final ordered list of candidate media URLs. Immutable snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedList {
    urls: Vec<String>,
}

impl RankedList {
    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }
}

impl From<Vec<String>> for RankedList {
    fn from(urls: Vec<String>) -> Self {
        Self { urls }
    }
}

/// Applies blocklist filtering and the mode-specific partition to a candidate
/// set.
///
/// The blocklist check is case-insensitive plain substring containment: both
/// the candidate URL and each blocked substring are lowercased before
/// comparison, so `Analytics` and `analytics` block alike. When the mode has a
/// preferred CDN host, matching URLs are stably moved to the front; relative
/// order inside each partition is preserved.
pub fn rank(set: CandidateSet, blocked_substrings: &[String], mode: SiteMode) -> RankedList {
    let blocked: Vec<String> = blocked_substrings
        .iter()
        .map(|s| s.to_lowercase())
        .collect();

    let kept: Vec<String> = set
        .into_candidates()
        .into_iter()
        .map(|c| c.url)
        .filter(|url| {
            let lower = url.to_lowercase();
            !blocked.iter().any(|b| lower.contains(b.as_str()))
        })
        .collect();

    let urls = match mode.preferred_host_marker() {
        Some(marker) => {
            let (preferred, others): (Vec<String>, Vec<String>) =
                kept.into_iter().partition(|u| u.contains(marker));
            let mut urls = preferred;
            urls.extend(others);
            urls
        }
        None => kept,
    };

    RankedList { urls }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{CandidateSource, RawCandidate};

    fn set_of(urls: &[&str]) -> CandidateSet {
        let mut set = CandidateSet::new();
        for u in urls {
            set.push(RawCandidate::new((*u).into(), CandidateSource::Network));
        }
        set
    }

    #[test]
    fn detect_mode_from_hostname() {
        assert_eq!(
            SiteMode::detect("https://www.threads.net/@user/post/abc"),
            SiteMode::ThreadsNet
        );
        assert_eq!(
            SiteMode::detect("https://www.threads.com/@user"),
            SiteMode::ThreadsCom
        );
        assert_eq!(
            SiteMode::detect("https://example.com/page"),
            SiteMode::Generic
        );
        assert_eq!(SiteMode::detect("not a url"), SiteMode::Generic);
    }

    #[test]
    fn detect_rejects_lookalike_hosts() {
        assert_eq!(
            SiteMode::detect("https://xthreads.net/@user"),
            SiteMode::Generic
        );
        assert_eq!(
            SiteMode::detect("https://notthreads.com/page"),
            SiteMode::Generic
        );
        // Real subdomains still match.
        assert_eq!(
            SiteMode::detect("https://www.threads.net/@user"),
            SiteMode::ThreadsNet
        );
    }

    #[test]
    fn partition_preserves_relative_order_in_both_halves() {
        let set = set_of(&[
            "https://a.example.com/1.mp4",
            "https://video.cdninstagram.com/2.mp4",
            "https://b.example.com/3.mp4",
            "https://scontent.cdninstagram.com/4.mp4",
        ]);
        let ranked = rank(set, &[], SiteMode::ThreadsNet);
        assert_eq!(
            ranked.as_slice(),
            [
                "https://video.cdninstagram.com/2.mp4",
                "https://scontent.cdninstagram.com/4.mp4",
                "https://a.example.com/1.mp4",
                "https://b.example.com/3.mp4",
            ]
        );
    }

    #[test]
    fn no_partition_outside_threads_net() {
        let urls = [
            "https://a.example.com/1.mp4",
            "https://video.cdninstagram.com/2.mp4",
        ];
        for mode in [SiteMode::ThreadsCom, SiteMode::Generic] {
            let ranked = rank(set_of(&urls), &[], mode);
            assert_eq!(ranked.as_slice(), urls);
        }
    }

    #[test]
    fn blocklist_filters_case_insensitively() {
        let set = set_of(&[
            "https://x.com/ANALYTICS/v.mp4",
            "https://x.com/ok.mp4",
            "https://x.com/Metrics/v.mp4",
        ]);
        let blocked = vec!["analytics".to_string(), "metric".to_string()];
        let ranked = rank(set, &blocked, SiteMode::Generic);
        assert_eq!(ranked.as_slice(), ["https://x.com/ok.mp4"]);
    }

    #[test]
    fn empty_set_ranks_to_empty_list() {
        let ranked = rank(CandidateSet::new(), &[], SiteMode::ThreadsNet);
        assert!(ranked.is_empty());
    }
}
