//! Candidate data model: raw matches and the order-preserving deduplicated set.

use std::collections::HashSet;

/// Where a candidate URL string was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Observed as a network response URL during page load.
    Network,
    /// Regex match against the CDN-specific media-host pattern.
    CdnPattern,
    /// Regex match against the generic `.mp4` URL pattern.
    GenericPattern,
    /// `src` attribute of a `<video>` tag.
    VideoTag,
    /// `src` attribute of a `<source>` tag.
    SourceTag,
}

/// A single URL string as it appeared in one source. Produced once per page
/// visit and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    pub url: String,
    pub source: CandidateSource,
}

impl RawCandidate {
    pub fn new(url: String, source: CandidateSource) -> Self {
        Self { url, source }
    }

    /// Builds a candidate from a raw pattern match, normalizing JSON-escaped
    /// slashes (`\/`) that appear when URLs are embedded in script data.
    pub fn cleaned(raw: &str, source: CandidateSource) -> Self {
        Self {
            url: raw.replace("\\/", "/"),
            source,
        }
    }
}

/// Deduplicated, order-preserving candidate collection keyed by exact string
/// equality. Relative order matches first-seen order across sources.
#[derive(Debug, Default)]
pub struct CandidateSet {
    items: Vec<RawCandidate>,
    seen: HashSet<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a candidate unless its URL string was already seen.
    /// Returns true if the candidate was kept.
    pub fn push(&mut self, candidate: RawCandidate) -> bool {
        if self.seen.contains(&candidate.url) {
            return false;
        }
        self.seen.insert(candidate.url.clone());
        self.items.push(candidate);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawCandidate> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_candidates(self) -> Vec<RawCandidate> {
        self.items
    }
}
