//! URL discovery and ranking: turn raw HTML plus a sequence of network-observed
//! URLs into an ordered, deduplicated list of downloadable media URLs.
//!
//! Pure text processing. Nothing in this module performs I/O or can fail;
//! malformed input simply yields fewer or zero matches, and an empty result is
//! a valid outcome the caller interprets.

mod candidates;
mod patterns;
mod rank;

pub use candidates::{CandidateSet, CandidateSource, RawCandidate};
pub use patterns::{patterns, ExtractPatterns};
pub use rank::{rank, RankedList, SiteMode};

/// Collects candidates from the network-observed sequence and the four HTML
/// pattern passes, in source priority order.
///
/// Network observations come first: they reflect the media endpoint the browser
/// actually requested and are less prone to false positives than markup matches.
/// HTML passes follow in fixed order: CDN-specific host pattern, generic `.mp4`
/// pattern, `<video src>`, `<source src>`. Duplicates keep their first-seen
/// position.
pub fn extract_candidates(html: &str, network_urls: &[String]) -> CandidateSet {
    let pats = patterns();
    let mut set = CandidateSet::new();

    for url in network_urls {
        set.push(RawCandidate::new(url.clone(), CandidateSource::Network));
    }

    for m in pats.cdn_host.find_iter(html) {
        set.push(RawCandidate::cleaned(m.as_str(), CandidateSource::CdnPattern));
    }
    for m in pats.generic_mp4.find_iter(html) {
        set.push(RawCandidate::cleaned(
            m.as_str(),
            CandidateSource::GenericPattern,
        ));
    }
    for cap in pats.video_tag.captures_iter(html) {
        set.push(RawCandidate::cleaned(&cap[1], CandidateSource::VideoTag));
    }
    for cap in pats.source_tag.captures_iter(html) {
        set.push(RawCandidate::cleaned(&cap[1], CandidateSource::SourceTag));
    }

    set
}

/// Full discovery pipeline: extract, filter by blocklist, rank by site mode.
pub fn discover(
    html: &str,
    network_urls: &[String],
    blocked_substrings: &[String],
    mode: SiteMode,
) -> RankedList {
    rank(
        extract_candidates(html, network_urls),
        blocked_substrings,
        mode,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocked() -> Vec<String> {
        vec!["analytics".to_string(), "metric".to_string()]
    }

    #[test]
    fn network_urls_rank_ahead_of_markup_matches() {
        let html = r#"<video src="https://video.cdninstagram.com/a.mp4">"#;
        let network = vec!["https://cdn.example.com/b.mp4".to_string()];
        let ranked = discover(html, &network, &blocked(), SiteMode::Generic);
        assert_eq!(
            ranked.as_slice(),
            [
                "https://cdn.example.com/b.mp4",
                "https://video.cdninstagram.com/a.mp4",
            ]
        );
    }

    #[test]
    fn duplicate_across_network_and_html_kept_once_at_first_position() {
        let html = r#"<source src="https://cdn.example.com/b.mp4"> <video src="https://v.example.com/c.mp4">"#;
        let network = vec!["https://cdn.example.com/b.mp4".to_string()];
        let ranked = discover(html, &network, &blocked(), SiteMode::Generic);
        assert_eq!(
            ranked.as_slice(),
            [
                "https://cdn.example.com/b.mp4",
                "https://v.example.com/c.mp4",
            ]
        );
    }

    #[test]
    fn pass_priority_order_for_html_only_candidates() {
        // One hit per pass, laid out in reverse document order to prove the
        // ordering comes from pass priority, not document position.
        let html = concat!(
            r#"<source src="https://host/frompass4.webm">"#,
            r#"<video src="https://host/frompass3.webm">"#,
            r#"see https://host/frompass2.mp4 inline "#,
            r#"and https://video.cdninstagram.com/frompass1 last"#,
        );
        let ranked = discover(html, &[], &blocked(), SiteMode::Generic);
        assert_eq!(
            ranked.as_slice(),
            [
                "https://video.cdninstagram.com/frompass1",
                "https://host/frompass2.mp4",
                "https://host/frompass3.webm",
                "https://host/frompass4.webm",
            ]
        );
    }

    #[test]
    fn blocked_substrings_are_dropped_from_any_source() {
        let html = r#"<video src="https://x.com/analytics/video.mp4">"#;
        let network = vec!["https://x.com/Metrics/v.mp4".to_string()];
        let ranked = discover(html, &network, &blocked(), SiteMode::Generic);
        assert!(ranked.is_empty());
    }

    #[test]
    fn blocklist_check_is_case_insensitive() {
        let html = r#"<video src="https://x.com/Analytics/video.mp4">"#;
        let ranked = discover(html, &[], &blocked(), SiteMode::Generic);
        assert!(ranked.is_empty());
    }

    #[test]
    fn threads_net_mode_promotes_instagram_cdn() {
        let html = concat!(
            r#"see https://other.example.com/a.mp4 "#,
            r#"and https://media.example.com/b.mp4"#,
        );
        let network = vec!["https://video.cdninstagram.com/c.mp4".to_string()];
        // Network URL is already first; add a markup CDN hit behind the others.
        let html = format!("{html} <video src=\"https://scontent.cdninstagram.com/d.mp4\">");
        let ranked = discover(&html, &network, &blocked(), SiteMode::ThreadsNet);
        assert_eq!(
            ranked.as_slice(),
            [
                "https://video.cdninstagram.com/c.mp4",
                "https://scontent.cdninstagram.com/d.mp4",
                "https://other.example.com/a.mp4",
                "https://media.example.com/b.mp4",
            ]
        );
    }

    #[test]
    fn escaped_slashes_in_matches_are_normalized() {
        let html = r#"{"src":"https://host/v\/t2\/clip.mp4"}"#;
        let ranked = discover(html, &[], &blocked(), SiteMode::Generic);
        assert_eq!(ranked.as_slice(), ["https://host/v/t2/clip.mp4"]);
    }

    #[test]
    fn extraction_is_deterministic() {
        let html = r#"<video src="https://a/1.mp4"><source src="https://b/2.mp4">"#;
        let network = vec!["https://c/3.mp4".to_string()];
        let first = discover(html, &network, &blocked(), SiteMode::ThreadsNet);
        let second = discover(html, &network, &blocked(), SiteMode::ThreadsNet);
        assert_eq!(first.as_slice(), second.as_slice());
    }

    #[test]
    fn garbage_input_yields_empty_result() {
        let ranked = discover("not html at all <<<>>>", &[], &blocked(), SiteMode::Generic);
        assert!(ranked.is_empty());
        assert_eq!(ranked.len(), 0);
    }
}
