//! URL list loading.
//!
//! Accepts one entry per line, either a bare URL or `index|URL`. Blank lines
//! are skipped silently; anything else that does not yield a URL is logged and
//! dropped.

use std::path::Path;

/// Lines must start with this to count as a URL.
const SCHEME_PREFIX: &str = "http";
const INDEX_SEPARATOR: char = '|';

/// Load URLs from a file. An unreadable file is logged and yields an empty list.
pub fn load_urls(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let urls = parse_urls(&text);
            tracing::info!("loaded {} URLs from {}", urls.len(), path.display());
            urls
        }
        Err(e) => {
            tracing::error!("error loading URLs from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Parse URL list text, keeping input order.
pub fn parse_urls(text: &str) -> Vec<String> {
    let mut urls = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_num = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with(SCHEME_PREFIX) {
            tracing::debug!("line {}: added URL {}", line_num, line);
            urls.push(line.to_string());
        } else if let Some((_, rest)) = line.split_once(INDEX_SEPARATOR) {
            let url = rest.trim();
            if url.starts_with(SCHEME_PREFIX) {
                tracing::debug!("line {}: added URL {}", line_num, url);
                urls.push(url.to_string());
            } else {
                tracing::warn!("line {}: invalid URL in numbered format: {}", line_num, line);
            }
        } else {
            tracing::warn!("line {}: unrecognized format: {}", line_num, line);
        }
    }
    urls
}
