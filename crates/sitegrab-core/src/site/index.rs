//! Index page rendering from a template.
//!
//! The template carries one block between [`PAGES_BEGIN`] and [`PAGES_END`];
//! the whole block, markers included, is replaced by one card per page.
//! `{{last_updated}}` and `{{page_count}}` are filled in anywhere in the file.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::path::Path;

use super::{escape_html, extract_title, page_filename};
use crate::store::ResultsLog;

pub const PAGES_BEGIN: &str = "<!-- BEGIN: Scraped Pages -->";
pub const PAGES_END: &str = "<!-- END: Scraped Pages -->";
const LAST_UPDATED: &str = "{{last_updated}}";
const PAGE_COUNT: &str = "{{page_count}}";
const CARD_INDENT: &str = "                ";

fn page_card(title: &str, url: &str, filename: &str) -> String {
    let i = CARD_INDENT;
    format!(
        "{i}<div class=\"page-card\">\n\
         {i}    <div class=\"page-info\">\n\
         {i}        <div class=\"page-title\">{}</div>\n\
         {i}        <div class=\"page-url\">{}</div>\n\
         {i}    </div>\n\
         {i}    <a href=\"{}\" class=\"page-link\" target=\"_blank\">View Page</a>\n\
         {i}</div>",
        escape_html(title),
        escape_html(url),
        escape_html(filename),
    )
}

/// Render the index from `template`, stamping `now`.
pub fn render_index(template: &str, results: &ResultsLog, now: NaiveDateTime) -> Result<String> {
    let begin = template
        .find(PAGES_BEGIN)
        .with_context(|| format!("template has no {PAGES_BEGIN} marker"))?;
    let end_rel = template[begin..]
        .find(PAGES_END)
        .with_context(|| format!("template has no {PAGES_END} marker after {PAGES_BEGIN}"))?;
    let end = begin + end_rel + PAGES_END.len();

    // Replace from the start of the marker's line so cards keep their own indent.
    let line_start = template[..begin].rfind('\n').map_or(0, |p| p + 1);
    let block_start = if template[line_start..begin].trim().is_empty() {
        line_start
    } else {
        begin
    };

    let cards: Vec<String> = results
        .records
        .iter()
        .map(|r| {
            let title = extract_title(&r.html_content).unwrap_or_else(|| r.url.clone());
            page_card(&title, &r.url, &page_filename(&r.url))
        })
        .collect();

    let mut out = String::with_capacity(template.len() + cards.len() * 256);
    out.push_str(&template[..block_start]);
    out.push_str(&cards.join("\n"));
    out.push_str(&template[end..]);

    let stamp = now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
    Ok(out
        .replace(LAST_UPDATED, &stamp)
        .replace(PAGE_COUNT, &results.len().to_string()))
}

/// Read `template_path`, render, and write the result to `out`.
pub fn write_index(template_path: &Path, results: &ResultsLog, out: &Path) -> Result<()> {
    let template = std::fs::read_to_string(template_path)
        .with_context(|| format!("read template: {}", template_path.display()))?;
    let html = render_index(&template, results, chrono::Local::now().naive_local())?;
    std::fs::write(out, html).with_context(|| format!("write index: {}", out.display()))?;
    tracing::info!("generated {} with {} pages", out.display(), results.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PageRecord;

    const TEMPLATE: &str = "<html>\n<body>\n<p>Updated {{last_updated}}, {{page_count}} pages</p>\n<div class=\"pages\">\n                <!-- BEGIN: Scraped Pages -->\n                {{#each pages}}\n                <div class=\"page-card\">{{title}}</div>\n                {{/each}}\n                <!-- END: Scraped Pages -->\n</div>\n</body>\n</html>\n";

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2025-01-02T03:04:05", "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn results() -> ResultsLog {
        let mut log = ResultsLog::default();
        log.push_unique(PageRecord::now(
            "https://site.test/about-me",
            "<HTML><TITLE>About <Me></TITLE></HTML>".into(),
            200,
        ));
        log.push_unique(PageRecord::now("https://site.test/blog/hi", "<p>none</p>".into(), 200));
        log
    }

    #[test]
    fn replaces_block_and_placeholders() {
        let html = render_index(TEMPLATE, &results(), now()).unwrap();
        assert!(!html.contains(PAGES_BEGIN));
        assert!(!html.contains("{{#each"));
        assert!(html.contains("Updated 2025-01-02T03:04:05.000000, 2 pages"));
        assert_eq!(html.matches("class=\"page-card\"").count(), 2);
        assert!(html.contains("<a href=\"about_me.html\""));
        assert!(html.contains("<a href=\"blog_hi.html\""));
        assert!(html.ends_with("</div>\n</div>\n</body>\n</html>\n"));
    }

    #[test]
    fn titles_are_escaped_and_fall_back_to_url() {
        let html = render_index(TEMPLATE, &results(), now()).unwrap();
        assert!(html.contains("<div class=\"page-title\">About &lt;Me&gt;</div>"));
        assert!(html.contains("<div class=\"page-title\">https://site.test/blog/hi</div>"));
    }

    #[test]
    fn template_without_block_is_rejected() {
        assert!(render_index("<html></html>", &results(), now()).is_err());
        let only_begin = format!("<html>{PAGES_BEGIN}</html>");
        assert!(render_index(&only_begin, &results(), now()).is_err());
    }

    #[test]
    fn write_index_reads_and_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("template.html");
        let out = dir.path().join("index.html");
        std::fs::write(&template, TEMPLATE).unwrap();
        write_index(&template, &results(), &out).unwrap();
        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("2 pages"));
    }
}
