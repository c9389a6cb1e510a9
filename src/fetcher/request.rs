use url::Url;

use crate::app::FetchError;

pub const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/top-headlines";
pub const DEFAULT_COUNTRY: &str = "us";

/// Everything needed to build the top-headlines URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlinesRequest {
    pub endpoint: String,
    pub country: String,
    pub api_key: Option<String>,
}

impl HeadlinesRequest {
    pub fn new(endpoint: impl Into<String>, country: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            country: country.into(),
            api_key,
        }
    }

    /// Build the request URL, or explain why it cannot be built.
    pub fn to_url(&self) -> Result<Url, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| FetchError::InvalidRequest("no API key configured".into()))?;

        let country = self.country.trim();
        if country.is_empty() {
            return Err(FetchError::InvalidRequest("country must not be empty".into()));
        }

        let mut url = Url::parse(self.endpoint.trim())
            .map_err(|e| FetchError::InvalidRequest(format!("{}: {}", self.endpoint, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidRequest(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }

        url.query_pairs_mut()
            .append_pair("country", country)
            .append_pair("apiKey", api_key);

        Ok(url)
    }

    /// The request URL with the key masked, for logs.
    pub fn redacted(&self) -> String {
        match self.to_url() {
            Ok(url) => redact_api_key(&url),
            Err(_) => self.endpoint.clone(),
        }
    }
}

fn redact_api_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "apiKey" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
