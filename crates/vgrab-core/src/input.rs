//! Operator input: target URL validation and newline-delimited URL list files.
//!
//! Input problems are typed so the CLI can exit with a distinguishable status
//! (missing/empty/invalid input aborts the run; everything later degrades to
//! per-item outcomes).

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Invalid operator input. The CLI maps this to its own exit code.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to read input file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("input file {0} contains no URLs")]
    EmptyFile(PathBuf),
    #[error("invalid target URL: {0}")]
    InvalidUrl(String),
}

/// Validates a target URL: must parse and use an http(s) scheme.
pub fn validate_target_url(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    let parsed = url::Url::parse(trimmed).map_err(|_| InputError::InvalidUrl(raw.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(InputError::InvalidUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Reads a newline-delimited URL list: one URL per line, blank lines skipped,
/// surrounding whitespace trimmed. An empty result is an input error: a batch
/// download with nothing to do means the operator pointed at the wrong file.
pub fn read_url_list(path: &Path) -> Result<Vec<String>, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound(path.to_path_buf()));
    }
    let data = std::fs::read_to_string(path).map_err(|source| InputError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let urls: Vec<String> = data
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        return Err(InputError::EmptyFile(path.to_path_buf()));
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn validate_accepts_http_and_https() {
        assert!(validate_target_url("https://www.threads.net/@user").is_ok());
        assert!(validate_target_url("http://example.com").is_ok());
        // Leading/trailing whitespace is tolerated.
        assert_eq!(
            validate_target_url("  https://example.com/x  ").unwrap(),
            "https://example.com/x"
        );
    }

    #[test]
    fn validate_rejects_other_schemes_and_garbage() {
        assert!(matches!(
            validate_target_url("ftp://example.com/file"),
            Err(InputError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_target_url("not a url"),
            Err(InputError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_target_url(""),
            Err(InputError::InvalidUrl(_))
        ));
    }

    #[test]
    fn read_list_trims_and_skips_blanks() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "https://h/a.mp4").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "  https://h/b.mp4  ").unwrap();
        f.flush().unwrap();

        let urls = read_url_list(f.path()).unwrap();
        assert_eq!(urls, vec!["https://h/a.mp4", "https://h/b.mp4"]);
    }

    #[test]
    fn read_list_missing_file() {
        let err = read_url_list(Path::new("/nonexistent/input.txt")).unwrap_err();
        assert!(matches!(err, InputError::FileNotFound(_)));
    }

    #[test]
    fn read_list_empty_file() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let err = read_url_list(f.path()).unwrap_err();
        assert!(matches!(err, InputError::EmptyFile(_)));
    }
}
