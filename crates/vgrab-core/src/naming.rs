//! Destination filename derivation.
//!
//! Prefers a content-derived name from the URL path when it looks like a video
//! file, otherwise falls back to the positional `video_<index>.mp4` template.
//! Names are sanitized for Linux filesystems. The index always reflects the
//! ranked-list position for reproducibility, never completion order.

/// Extracts the last path segment from a URL for use as a filename hint.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let path = parsed.path();
    let segment = path.split('/').filter(|s| !s.is_empty()).last()?;
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Sanitizes a candidate filename for safe use on Linux.
///
/// - Replaces NUL, `/`, `\`, control characters and whitespace with `_`
/// - Trims leading/trailing spaces, dots and underscores
/// - Collapses consecutive underscores
/// - Limits length to 255 bytes (Linux NAME_MAX)
pub fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let replacement = if c == '\0' || c == '/' || c == '\\' || c.is_control() {
            '_'
        } else if c == ' ' || c == '\t' {
            '_'
        } else {
            c
        };

        if replacement == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(replacement);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '\t' || c == '.' || c == '_');

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Positional fallback name for the item at 1-based `index`.
pub fn indexed_filename(index: usize) -> String {
    format!("video_{index}.mp4")
}

/// Derives the destination filename for the ranked-list item at 1-based
/// `index`.
///
/// Uses the URL path's last segment when it names a video file directly
/// (`.mp4` suffix after stripping the query). Falls back to
/// `video_<index>.mp4` when the path gives nothing usable or the sanitized
/// result is degenerate.
pub fn derive_filename(url: &str, index: usize) -> String {
    let candidate = match filename_from_url_path(url) {
        Some(c) => c,
        None => return indexed_filename(index),
    };
    if !candidate.to_lowercase().ends_with(".mp4") {
        return indexed_filename(index);
    }

    let sanitized = sanitize_filename(&candidate);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        indexed_filename(index)
    } else {
        sanitized
    }
}
