//! Error type for a single fetch-and-save run.

use std::path::PathBuf;

/// Page where Earthdata users generate a fresh bearer token.
pub const EARTHDATA_PROFILE_URL: &str = "https://urs.earthdata.nasa.gov/profile";

/// Failure of one fetch. Only `Unauthorized` gets special treatment by the CLI;
/// every other variant is fatal.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Server answered 401. Nothing was written.
    #[error("unauthorized: the bearer token is invalid or expired (renew it at {renew_url})")]
    Unauthorized { renew_url: &'static str },

    /// Any other non-2xx status.
    #[error("GET {url} returned HTTP {code}")]
    Status { url: String, code: u32 },

    /// Base URL could not be parsed.
    #[error("invalid URL {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// libcurl reported an error (connect, resolve, TLS, timeout...).
    #[error("GET request failed")]
    Transport(#[from] curl::Error),

    /// Response body is not valid JSON.
    #[error("response body is not valid JSON")]
    Json(#[from] serde_json::Error),

    /// Writing or renaming the output file failed.
    #[error("failed to write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn unauthorized() -> Self {
        FetchError::Unauthorized {
            renew_url: EARTHDATA_PROFILE_URL,
        }
    }

    /// True for the one error the CLI reports with guidance instead of a plain failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FetchError::Unauthorized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_mentions_profile_page() {
        let e = FetchError::unauthorized();
        assert!(e.is_unauthorized());
        assert!(e.to_string().contains(EARTHDATA_PROFILE_URL));
    }

    #[test]
    fn status_display() {
        let e = FetchError::Status {
            url: "https://example.com/x".to_string(),
            code: 500,
        };
        assert_eq!(e.to_string(), "GET https://example.com/x returned HTTP 500");
        assert!(!e.is_unauthorized());
    }

    #[test]
    fn source_printed_once_in_chain() {
        let e = FetchError::Io {
            path: PathBuf::from("output.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied here"),
        };
        assert_eq!(e.to_string(), "failed to write output.json");
        let chain = format!("{:#}", anyhow::Error::from(e));
        assert_eq!(chain, "failed to write output.json: denied here");
    }

    #[test]
    fn json_error_chain_has_single_cause() {
        let parse = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let cause = parse.to_string();
        let chain = format!("{:#}", anyhow::Error::from(FetchError::from(parse)));
        assert!(chain.starts_with("response body is not valid JSON: "));
        assert_eq!(chain.matches(&cause).count(), 1);
    }
}
