//! Shared HTTP plumbing: client construction and base URL handling.

use std::time::Duration;

use agri_core::prelude::*;
use url::Url;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("agridesk/", env!("CARGO_PKG_VERSION"));

/// Build the reqwest client shared by both transports.
///
/// `timeout` of `None` keeps reqwest's default (no overall timeout).
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| Error::http(format!("Failed to build HTTP client: {e}")))
}

/// Parse a service base URL and make sure it ends with `/`.
///
/// `Url::join` replaces the last path segment unless the base ends with a
/// slash, so `http://host/api` must become `http://host/api/` before joining.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|e| Error::invalid_url(trimmed, e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_url(trimmed, "scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(Error::invalid_url(trimmed, "URL cannot be used as a base"));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Join a relative path onto a normalized base URL.
pub fn join(base: &Url, path: &str) -> Result<Url> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| Error::invalid_url(format!("{base}{path}"), e.to_string()))
}
