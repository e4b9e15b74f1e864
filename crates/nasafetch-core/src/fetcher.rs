//! Fetch one JSON document and persist it.
//!
//! Single request/response cycle: GET, check status, parse, write. A 401 is
//! reported as `FetchError::Unauthorized`; every other failure is fatal and
//! leaves the output file untouched.

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::FetchError;
use crate::http::{self, HttpOptions};
use crate::output;
use crate::request::RequestDescriptor;

/// Outcome of a successful `fetch_and_save`.
#[derive(Debug, Clone)]
pub struct FetchReport {
    /// Full URL that was requested.
    pub url: String,
    pub status: u32,
    /// Size of the written artifact in bytes.
    pub bytes_written: u64,
    pub output: PathBuf,
    /// Parsed response, kept for callers that want to summarize it.
    pub payload: Value,
}

/// GETs `request` and parses the body as JSON. Returns the requested URL, status and value.
pub fn fetch_json(
    request: &RequestDescriptor,
    opts: &HttpOptions,
) -> Result<(String, u32, Value), FetchError> {
    let url = request.url()?;
    tracing::info!(?request, "GET {}", url);

    let resp = http::get(&url, request.headers(), opts)?;
    if resp.status == 401 {
        tracing::warn!("GET {} rejected with 401", url);
        return Err(FetchError::unauthorized());
    }
    if !resp.is_success() {
        return Err(FetchError::Status {
            url,
            code: resp.status,
        });
    }

    let payload: Value = serde_json::from_slice(&resp.body)?;
    Ok((url, resp.status, payload))
}

/// Fetches `request` and writes the pretty-printed response to `output_path`,
/// overwriting any previous file. Nothing is written on failure.
pub fn fetch_and_save(
    request: &RequestDescriptor,
    output_path: &Path,
    opts: &HttpOptions,
) -> Result<FetchReport, FetchError> {
    let (url, status, payload) = fetch_json(request, opts)?;
    let bytes_written = output::write_json(output_path, &payload)?;
    tracing::info!(
        status,
        bytes_written,
        "saved response from {} to {}",
        url,
        output_path.display()
    );

    Ok(FetchReport {
        url,
        status,
        bytes_written,
        output: output_path.to_path_buf(),
        payload,
    })
}
