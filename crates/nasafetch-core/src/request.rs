//! Request descriptor: base URL, query parameters and optional headers.
//!
//! Built once per run and then only read. The EONET and CMR presets carry the
//! endpoint constants; their parameters come from config or CLI flags.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::FetchError;

/// NASA EONET v3 events endpoint (public, no token).
pub const EONET_EVENTS_URL: &str = "https://eonet.gsfc.nasa.gov/api/v3/events";

/// NASA CMR granule search endpoint (bearer token).
pub const CMR_GRANULES_URL: &str = "https://cmr.earthdata.nasa.gov/search/granules.json";

/// Scalar query parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Int(n) => write!(f, "{}", n),
            QueryValue::Bool(b) => write!(f, "{}", b),
            QueryValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for QueryValue {
    fn from(n: i64) -> Self {
        QueryValue::Int(n)
    }
}

impl From<u32> for QueryValue {
    fn from(n: u32) -> Self {
        QueryValue::Int(i64::from(n))
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Bool(b)
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Str(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::Str(s)
    }
}

/// EONET event status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EonetStatus {
    #[default]
    Open,
    Closed,
    All,
}

impl EonetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EonetStatus::Open => "open",
            EonetStatus::Closed => "closed",
            EonetStatus::All => "all",
        }
    }
}

impl fmt::Display for EonetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EonetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(EonetStatus::Open),
            "closed" => Ok(EonetStatus::Closed),
            "all" => Ok(EonetStatus::All),
            other => Err(format!(
                "unknown event status '{}' (expected open, closed or all)",
                other
            )),
        }
    }
}

/// Query parameters for the EONET events endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EonetParams {
    /// Number of events.
    pub limit: u32,
    /// Look-back window in days.
    pub days: u32,
    pub status: EonetStatus,
}

impl Default for EonetParams {
    fn default() -> Self {
        Self {
            limit: 5,
            days: 20,
            status: EonetStatus::Open,
        }
    }
}

/// Query parameters for the CMR granule search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmrParams {
    /// Dataset to search (CMR collection concept id).
    pub collection_concept_id: String,
    /// Number of granules per page.
    pub page_size: u32,
}

impl Default for CmrParams {
    fn default() -> Self {
        Self {
            collection_concept_id: "C1980520923-GHRC_DAAC".to_string(),
            page_size: 10,
        }
    }
}

/// One GET request: endpoint, query parameters (unique keys) and headers.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    base_url: String,
    query: BTreeMap<String, QueryValue>,
    headers: BTreeMap<String, String>,
}

impl RequestDescriptor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
        }
    }

    /// Adds a query parameter. A repeated key replaces the earlier value.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets `Authorization: Bearer <token>`.
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token.trim()))
    }

    /// EONET events request.
    pub fn eonet_events(params: &EonetParams) -> Self {
        Self::new(EONET_EVENTS_URL)
            .param("limit", params.limit)
            .param("days", params.days)
            .param("status", params.status.as_str())
    }

    /// CMR granule search request, authenticated with `token`.
    pub fn cmr_granules(params: &CmrParams, token: &str) -> Self {
        Self::new(CMR_GRANULES_URL)
            .param("collection_concept_id", params.collection_concept_id.as_str())
            .param("page_size", params.page_size)
            .bearer(token)
    }

    /// Points the request at a different endpoint, keeping query and headers.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn query(&self) -> &BTreeMap<String, QueryValue> {
        &self.query
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Full request URL: base URL plus form-urlencoded query string.
    pub fn url(&self) -> Result<String, FetchError> {
        let mut url = url::Url::parse(&self.base_url).map_err(|source| FetchError::InvalidUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &self.query {
                pairs.append_pair(k, &v.to_string());
            }
        }
        Ok(url.into())
    }
}

// Header values are left out so tokens never reach the log.
impl fmt::Debug for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("base_url", &self.base_url)
            .field("query", &self.query)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}
