//! Writing discovered candidate URLs to a newline-delimited text file.

use anyhow::{Context, Result};
use std::path::Path;

/// Writes `urls` to `path`, one per line, replacing any previous content.
/// Writing an empty list produces an empty file (zero candidates is benign).
pub fn write_url_list(path: &Path, urls: &[String]) -> Result<()> {
    let mut body = urls.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    std::fs::write(path, body)
        .with_context(|| format!("failed to write URL list to {}", path.display()))?;
    tracing::info!("saved {} URLs to {}", urls.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::read_url_list;

    #[test]
    fn written_list_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scraped_urls.txt");
        let urls = vec![
            "https://video.cdninstagram.com/a.mp4".to_string(),
            "https://cdn.example.com/b.mp4".to_string(),
        ];
        write_url_list(&path, &urls).unwrap();
        assert_eq!(read_url_list(&path).unwrap(), urls);
    }

    #[test]
    fn empty_list_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scraped_urls.txt");
        write_url_list(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
