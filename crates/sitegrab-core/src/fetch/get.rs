//! Single GET attempt over libcurl.

use std::str;

use super::profile::{RequestProfile, ACCEPT_ENCODING};
use crate::retry::FetchError;

/// Body and status of a 2xx response.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

/// Performs one GET with a fresh easy handle. Non-2xx statuses are errors.
///
/// Follows redirects. Runs in the current thread.
pub fn get_once(url: &str, profile: &RequestProfile) -> Result<PageResponse, FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(FetchError::Setup)?;
    easy.follow_location(true).map_err(FetchError::Setup)?;
    easy.max_redirections(10).map_err(FetchError::Setup)?;
    easy.useragent(&profile.user_agent).map_err(FetchError::Setup)?;
    easy.accept_encoding(ACCEPT_ENCODING).map_err(FetchError::Setup)?;
    easy.connect_timeout(profile.connect_timeout)
        .map_err(FetchError::Setup)?;
    easy.timeout(profile.timeout).map_err(FetchError::Setup)?;

    let mut list = curl::easy::List::new();
    for (k, v) in &profile.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))
            .map_err(FetchError::Setup)?;
    }
    easy.http_headers(list).map_err(FetchError::Setup)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(FetchError::Setup)?;
        transfer.perform().map_err(FetchError::Curl)?;
    }

    let code = easy.response_code().map_err(FetchError::Curl)?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    Ok(PageResponse {
        status: code as u16,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}
