//! Output filename for a scraped page.

use std::borrow::Cow;

const INDEX_STEM: &str = "index";
const BLOG_SEGMENT: &str = "blog";

/// Derives the local `.html` filename for a page URL.
///
/// The URL path (without surrounding slashes) becomes the stem, with `/` and
/// `-` turned into `_`; the site root maps to `index.html`. Posts under a
/// `blog/` segment are flattened to `blog_<slug>.html`. Unparseable input is
/// treated as a bare path.
///
/// # Examples
///
/// - `https://site.test/about-me/` → `about_me.html`
/// - `https://site.test/en/blog/first-post` → `blog_first_post.html`
pub fn page_filename(url: &str) -> String {
    let path: Cow<'_, str> = match url::Url::parse(url) {
        Ok(parsed) => Cow::Owned(parsed.path().to_string()),
        Err(_) => Cow::Borrowed(url),
    };
    let path = path.trim_matches('/');

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let stem = match segments.iter().position(|s| *s == BLOG_SEGMENT) {
        Some(pos) if pos + 1 < segments.len() => {
            format!("{}_{}", BLOG_SEGMENT, flatten(&segments[pos + 1..].join("/")))
        }
        _ if segments.is_empty() => INDEX_STEM.to_string(),
        _ => flatten(&segments.join("/")),
    };

    let stem = sanitize(&stem);
    if stem.is_empty() {
        format!("{INDEX_STEM}.html")
    } else {
        format!("{stem}.html")
    }
}

fn flatten(path: &str) -> String {
    path.replace(['/', '-'], "_")
}

/// Keeps ASCII alphanumerics, `_` and `.`; anything else becomes `_`.
fn sanitize(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.trim_matches('.').to_string()
}
