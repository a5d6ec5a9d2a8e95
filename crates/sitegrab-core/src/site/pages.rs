use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::{escape_html, page_filename, same_url};
use crate::record::PageRecord;
use crate::store::ResultsLog;

/// Minimal document for a record whose stored HTML is empty.
pub fn fallback_page(record: &PageRecord) -> String {
    let url = escape_html(&record.url);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{url}</title>\n</head>\n<body>\n<p>No content was captured for <a href=\"{url}\">{url}</a> (scraped {}).</p>\n</body>\n</html>\n",
        record.scraped_at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Write one HTML file per record into `out_dir`, skipping the site root so it
/// cannot overwrite the index. Returns the written paths in record order.
pub fn write_pages(
    results: &ResultsLog,
    site_root: Option<&str>,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create dir: {}", out_dir.display()))?;

    let mut written = Vec::new();
    for record in &results.records {
        if site_root.is_some_and(|root| same_url(&record.url, root)) {
            continue;
        }
        written.push(write_page_file(record, out_dir)?);
    }
    Ok(written)
}

/// Write a single record to `out_dir/<page_filename>`.
pub fn write_page_file(record: &PageRecord, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(page_filename(&record.url));
    let body = if record.html_content.trim().is_empty() {
        fallback_page(record)
    } else {
        record.html_content.clone()
    };
    std::fs::write(&path, body).with_context(|| format!("write page: {}", path.display()))?;
    tracing::info!("created {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_each_page_except_root() {
        let mut log = ResultsLog::default();
        log.push_unique(PageRecord::now("https://site.test/", "home".into(), 200));
        log.push_unique(PageRecord::now("https://site.test/about-me", "about".into(), 200));
        log.push_unique(PageRecord::now("https://site.test/blog/a-post", "post".into(), 200));

        let dir = tempfile::tempdir().unwrap();
        let written = write_pages(&log, Some("https://site.test/"), dir.path()).unwrap();

        assert_eq!(written.len(), 2);
        assert!(!dir.path().join("index.html").exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("about_me.html")).unwrap(),
            "about"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("blog_a_post.html")).unwrap(),
            "post"
        );
    }

    #[test]
    fn empty_html_gets_fallback_document() {
        let mut log = ResultsLog::default();
        log.push_unique(PageRecord::now("https://site.test/x?a=1&b=2", "  ".into(), 200));
        let dir = tempfile::tempdir().unwrap();
        let written = write_pages(&log, None, dir.path()).unwrap();
        let html = std::fs::read_to_string(&written[0]).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("https://site.test/x?a=1&amp;b=2"));
    }
}
