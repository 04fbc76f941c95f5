//! tmsearch.ai registry search backend.
//!
//! Provides the `SearchBackend` trait and its tmsearch.ai implementation.
//! Results are normalized into `CandidateMark`s; scoring never happens
//! here, the vendor accuracy is passed through untouched.

use markencheck_model::{CandidateMark, SearchQuery, TrademarkStatus};
use markencheck_query::{QueryDialect, QueryError, TmSearchDialect};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Public test key of the provider; result counts are capped with it.
pub const TEST_API_KEY: &str = "TESTAPIKEY";

pub const DEFAULT_BASE_URL: &str = "https://tmsearch.ai/api";

/// Errors from search backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Either a mark id or a number with its office is required")]
    MissingIdentifier,
}

/// Candidates returned for one keyword search.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    /// Hits the provider reports in total (may exceed `candidates.len()`)
    pub total: u64,
    pub candidates: Vec<CandidateMark>,
}

/// Which number an info lookup refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberKind {
    #[default]
    Application,
    Registration,
}

impl NumberKind {
    fn as_param(self) -> &'static str {
        match self {
            Self::Application => "APP",
            Self::Registration => "REG",
        }
    }
}

/// Identifies a single mark for a detail lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoRequest {
    /// Provider mark id
    Mid(u64),
    /// Office-specific application or registration number
    Number {
        number: String,
        kind: NumberKind,
        office: String,
    },
}

impl InfoRequest {
    fn params(&self) -> Result<Vec<(String, String)>, BackendError> {
        match self {
            Self::Mid(mid) => Ok(vec![("mid".to_string(), mid.to_string())]),
            Self::Number { number, kind, office } => {
                if number.trim().is_empty() || office.trim().is_empty() {
                    return Err(BackendError::MissingIdentifier);
                }
                Ok(vec![
                    ("number".to_string(), number.trim().to_string()),
                    ("type".to_string(), kind.as_param().to_string()),
                    ("office".to_string(), office.trim().to_uppercase()),
                ])
            }
        }
    }
}

/// Trait for registry search backends.
///
/// Keeps the risk policy independent of the provider.
pub trait SearchBackend {
    /// Search for candidates matching the query text.
    fn search(&self, query: &SearchQuery) -> impl Future<Output = Result<SearchResults, BackendError>> + Send;

    /// Fetch the full record of a single mark.
    fn info(&self, request: &InfoRequest) -> impl Future<Output = Result<CandidateMark, BackendError>> + Send;

    /// Get the backend name for logging.
    fn name(&self) -> &'static str;
}

/// tmsearch.ai backend configuration.
#[derive(Debug, Clone)]
pub struct TmSearchConfig {
    /// Base URL of the provider API
    pub base_url: String,
    /// API key sent with every request
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TmSearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: TEST_API_KEY.to_string(),
            timeout_secs: 30,
        }
    }
}

impl TmSearchConfig {
    /// Read `TMSEARCH_API_KEY` and `TMSEARCH_BASE_URL`, keeping defaults
    /// for whatever is unset or empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(key) = non_empty_var("TMSEARCH_API_KEY") {
            config.api_key = key;
        }
        if let Some(url) = non_empty_var("TMSEARCH_BASE_URL") {
            config.base_url = url;
        }
        config
    }

    pub fn is_test_key(&self) -> bool {
        self.api_key == TEST_API_KEY
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// tmsearch.ai search backend.
pub struct TmSearchBackend {
    config: TmSearchConfig,
    client: reqwest::Client,
}

impl TmSearchBackend {
    /// Create a new tmsearch.ai backend.
    pub fn new(config: TmSearchConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        if config.is_test_key() {
            tracing::info!("Using tmsearch.ai test API key (limited results)");
        }

        Ok(Self { config, client })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}/", self.config.base_url.trim_end_matches('/'), name)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        mut params: Vec<(String, String)>,
    ) -> Result<T, BackendError> {
        let url = self.endpoint(endpoint);
        tracing::debug!(url = %url, params = ?params, "Calling tmsearch");

        params.push(("api_key".to_string(), self.config.api_key.clone()));

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&params)
            .send()
            .await
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::QueryFailed(format!("HTTP {}: {}", status, body)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| BackendError::ParseError(e.to_string()))
    }
}

impl SearchBackend for TmSearchBackend {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, BackendError> {
        let params = match TmSearchDialect.translate(query) {
            Ok(params) => params,
            Err(QueryError::EmptyQuery) => return Ok(SearchResults::default()),
            Err(e) => return Err(BackendError::QueryFailed(e.to_string())),
        };

        let response: WireSearchResponse = self.fetch("search", params).await?;
        let results = response.into_results();

        tracing::info!(
            keyword = %query.mark_text,
            total = results.total,
            returned = results.candidates.len(),
            "tmsearch search complete"
        );

        Ok(results)
    }

    async fn info(&self, request: &InfoRequest) -> Result<CandidateMark, BackendError> {
        let params = request.params()?;
        let response: WireInfoResponse = self.fetch("info", params).await?;
        Ok(response.into_candidate())
    }

    fn name(&self) -> &'static str {
        "tmsearch"
    }
}

/// The provider sends `null` for empty lists and objects.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
struct WireDates {
    #[serde(default)]
    applied: Option<String>,
    #[serde(default)]
    granted: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireResult {
    mid: u64,
    #[serde(default)]
    verbal: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    class: Vec<u16>,
    #[serde(default)]
    submition: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    protection: Vec<String>,
    #[serde(default)]
    app: Option<String>,
    #[serde(default)]
    reg: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    date: WireDates,
    #[serde(default)]
    accuracy: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireSearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    result: Vec<WireResult>,
}

impl WireSearchResponse {
    fn into_results(self) -> SearchResults {
        SearchResults {
            total: self.total,
            candidates: self.result.into_iter().map(normalize_result).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireInfoClass {
    number: u16,
}

#[derive(Debug, Default, Deserialize)]
struct WireOwner {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireInfoResponse {
    #[serde(flatten)]
    base: WireInfoBase,
    #[serde(default, deserialize_with = "null_as_default")]
    class: Vec<WireInfoClass>,
    #[serde(default, deserialize_with = "null_as_default")]
    owner: WireOwner,
}

/// Info records share the search fields except for `class`.
#[derive(Debug, Deserialize)]
struct WireInfoBase {
    mid: u64,
    #[serde(default)]
    verbal: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    submition: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    protection: Vec<String>,
    #[serde(default)]
    app: Option<String>,
    #[serde(default)]
    reg: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    date: WireDates,
    #[serde(default)]
    accuracy: Option<f64>,
}

impl WireInfoResponse {
    fn into_candidate(self) -> CandidateMark {
        let base = self.base;
        let mut candidate = normalize_result(WireResult {
            mid: base.mid,
            verbal: base.verbal,
            status: base.status,
            class: self.class.into_iter().map(|c| c.number).collect(),
            submition: base.submition,
            protection: base.protection,
            app: base.app,
            reg: base.reg,
            date: base.date,
            accuracy: base.accuracy,
        });
        candidate.holder = self.owner.name.filter(|n| !n.trim().is_empty());
        candidate
    }
}

fn normalize_result(result: WireResult) -> CandidateMark {
    let name = result
        .verbal
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| format!("TM-{}", result.mid));

    CandidateMark {
        id: format!("tm-{}", result.mid),
        name,
        office: result.submition.unwrap_or_default(),
        nice_classes: result.class,
        designation_countries: result.protection,
        holder: None,
        status: result
            .status
            .as_deref()
            .map(TrademarkStatus::from)
            .unwrap_or_default(),
        application_number: result.app.unwrap_or_default(),
        registration_number: result.reg.unwrap_or_default(),
        application_date: result.date.applied.as_deref().and_then(parse_date),
        registration_date: result.date.granted.as_deref().and_then(parse_date),
        accuracy: result.accuracy.map_or(0, |a| a.round().clamp(0.0, 100.0) as u8),
    }
}

/// Convert a `YYYYMMDD` vendor date to ISO `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Option<String> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{}-{}-{}", &raw[0..4], &raw[4..6], &raw[6..8]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SEARCH_FIXTURE: &str = r#"{
        "total": 2,
        "result": [
            {
                "mid": 12345,
                "verbal": "ACELARI",
                "img": null,
                "status": "LIVE",
                "class": [9, 42],
                "submition": "EU",
                "protection": [],
                "app": "018123456",
                "reg": "018123456",
                "date": { "applied": "20200115", "granted": "20200601" },
                "accuracy": 92
            },
            {
                "mid": 777,
                "verbal": null,
                "status": "DEAD",
                "class": [],
                "submition": "WO",
                "protection": ["DE", "CH"],
                "app": "",
                "reg": "",
                "date": {},
                "accuracy": 41.6
            }
        ]
    }"#;

    #[test]
    fn test_parse_search_response() {
        let response: WireSearchResponse = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let results = response.into_results();

        assert_eq!(results.total, 2);
        assert_eq!(results.candidates.len(), 2);

        let first = &results.candidates[0];
        assert_eq!(first.id, "tm-12345");
        assert_eq!(first.name, "ACELARI");
        assert_eq!(first.office, "EU");
        assert_eq!(first.nice_classes, vec![9, 42]);
        assert_eq!(first.status, TrademarkStatus::Active);
        assert_eq!(first.application_date.as_deref(), Some("2020-01-15"));
        assert_eq!(first.registration_date.as_deref(), Some("2020-06-01"));
        assert_eq!(first.accuracy, 92);
    }

    #[test]
    fn test_missing_verbal_uses_mid() {
        let response: WireSearchResponse = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let second = &response.into_results().candidates[1];
        assert_eq!(second.name, "TM-777");
        assert_eq!(second.status, TrademarkStatus::Expired);
        assert_eq!(second.designation_countries, vec!["DE".to_string(), "CH".to_string()]);
        assert_eq!(second.application_date, None);
        assert_eq!(second.accuracy, 42);
    }

    #[test]
    fn test_null_fields_keep_the_page() {
        let json = r#"{
            "total": null,
            "result": [
                {
                    "mid": 1,
                    "verbal": "ACME",
                    "status": null,
                    "class": null,
                    "submition": null,
                    "protection": null,
                    "app": null,
                    "reg": null,
                    "date": null,
                    "accuracy": null
                },
                { "mid": 2, "verbal": "ACMEE", "class": [35], "date": { "applied": null } }
            ]
        }"#;
        let response: WireSearchResponse = serde_json::from_str(json).unwrap();
        let results = response.into_results();

        assert_eq!(results.total, 0);
        assert_eq!(results.candidates.len(), 2);
        let first = &results.candidates[0];
        assert_eq!(first.name, "ACME");
        assert!(first.nice_classes.is_empty());
        assert!(first.designation_countries.is_empty());
        assert_eq!(first.office, "");
        assert_eq!(first.status, TrademarkStatus::Unknown);
        assert_eq!(first.application_date, None);
        assert_eq!(first.accuracy, 0);
        assert_eq!(results.candidates[1].nice_classes, vec![35]);
    }

    #[test]
    fn test_info_null_class_and_owner() {
        let json = r#"{ "mid": 9, "verbal": "ACME", "class": null, "owner": null, "protection": null, "date": null }"#;
        let candidate = serde_json::from_str::<WireInfoResponse>(json).unwrap().into_candidate();
        assert!(candidate.nice_classes.is_empty());
        assert_eq!(candidate.holder, None);
    }

    #[test]
    fn test_empty_response() {
        let response: WireSearchResponse = serde_json::from_str("{}").unwrap();
        let results = response.into_results();
        assert_eq!(results.total, 0);
        assert!(results.candidates.is_empty());
    }

    #[test]
    fn test_parse_info_response() {
        let json = r#"{
            "mid": 12345,
            "verbal": "ACELARI",
            "status": "UNKN",
            "class": [{ "number": 9, "description": "Software" }, { "number": 42 }],
            "submition": "DE",
            "protection": [],
            "app": "302020000001",
            "reg": "",
            "date": { "applied": "2020011" },
            "owner": { "name": "Acelari GmbH", "country": "DE" }
        }"#;
        let info: WireInfoResponse = serde_json::from_str(json).unwrap();
        let candidate = info.into_candidate();

        assert_eq!(candidate.nice_classes, vec![9, 42]);
        assert_eq!(candidate.holder.as_deref(), Some("Acelari GmbH"));
        assert_eq!(candidate.status, TrademarkStatus::Unknown);
        assert_eq!(candidate.application_date, None);
        assert_eq!(candidate.accuracy, 0);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("20231231").as_deref(), Some("2023-12-31"));
        assert_eq!(parse_date("2023-12-31"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2023123a"), None);
    }

    #[test]
    fn test_info_request_params() {
        assert_eq!(InfoRequest::Mid(42).params().unwrap(), vec![("mid".to_string(), "42".to_string())]);

        let by_number = InfoRequest::Number {
            number: "018123456".into(),
            kind: NumberKind::Registration,
            office: "eu".into(),
        };
        assert_eq!(
            by_number.params().unwrap(),
            vec![
                ("number".to_string(), "018123456".to_string()),
                ("type".to_string(), "REG".to_string()),
                ("office".to_string(), "EU".to_string()),
            ]
        );

        let missing_office = InfoRequest::Number {
            number: "1".into(),
            kind: NumberKind::Application,
            office: " ".into(),
        };
        assert!(matches!(missing_office.params(), Err(BackendError::MissingIdentifier)));
    }

    #[test]
    fn test_config_defaults() {
        let config = TmSearchConfig::default();
        assert_eq!(config.base_url, "https://tmsearch.ai/api");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.is_test_key());
    }

    #[test]
    fn test_endpoint_url() {
        let backend = TmSearchBackend::new(TmSearchConfig {
            base_url: "http://localhost:8080/api/".into(),
            ..TmSearchConfig::default()
        })
        .unwrap();
        assert_eq!(backend.endpoint("search"), "http://localhost:8080/api/search/");
        assert_eq!(backend.name(), "tmsearch");
    }

    #[tokio::test]
    async fn test_empty_keyword_skips_request() {
        let backend = TmSearchBackend::new(TmSearchConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..TmSearchConfig::default()
        })
        .unwrap();
        let results = backend.search(&SearchQuery::new("?!")).await.unwrap();
        assert_eq!(results.total, 0);
        assert!(results.candidates.is_empty());
    }
}
