//! Blocking HTTP GET over libcurl.
//!
//! One `Easy` handle per call; the whole body is buffered in memory. No
//! timeouts are set unless the caller asks for them, so a stalled server can
//! block the calling thread indefinitely.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::FetchError;

/// Transport knobs. Both timeouts default to unset (libcurl defaults).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HttpOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
}

/// Status and raw body of a completed GET.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a GET on `url` with the given headers and returns whatever status
/// the server sent. Status interpretation is left to the caller.
///
/// Follows redirects.
pub fn get(
    url: &str,
    headers: &BTreeMap<String, String>,
    opts: &HttpOptions,
) -> Result<HttpResponse, FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    if let Some(d) = opts.connect_timeout {
        easy.connect_timeout(d)?;
    }
    if let Some(d) = opts.timeout {
        easy.timeout(d)?;
    }

    let mut list = curl::easy::List::new();
    for (k, v) in headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !headers.is_empty() {
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    tracing::debug!(status, bytes = body.len(), "GET {} completed", url);

    Ok(HttpResponse { status, body })
}
