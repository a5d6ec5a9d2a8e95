//! Static site output built from the results file.
//!
//! Filename derivation, the homepage copy, per-page files and the templated
//! index page. All of it works on a loaded [`ResultsLog`](crate::store::ResultsLog).

mod filename;
mod homepage;
mod html;
mod index;
mod pages;

pub use filename::page_filename;
pub use homepage::{find_root, write_homepage};
pub use html::{escape_html, extract_title};
pub use index::{render_index, write_index, PAGES_BEGIN, PAGES_END};
pub use pages::{fallback_page, write_page_file, write_pages};

/// URLs equal up to a trailing slash.
pub(crate) fn same_url(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}
