use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::app::{FetchError, NewsError};
use crate::domain::HeadlinesResponse;
use crate::fetcher::{HeadlineFetcher, HeadlinesRequest};
use crate::normalizer::Normalizer;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("newsdesk/", env!("CARGO_PKG_VERSION"));

pub struct HttpHeadlineFetcher {
    client: Client,
    normalizer: Normalizer,
}

impl HttpHeadlineFetcher {
    pub fn new() -> Result<Self, NewsError> {
        Self::with_options(Duration::from_secs(DEFAULT_TIMEOUT_SECS), DEFAULT_USER_AGENT)
    }

    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            normalizer: Normalizer::new(),
        })
    }
}

#[async_trait]
impl HeadlineFetcher for HttpHeadlineFetcher {
    async fn fetch(&self, request: &HeadlinesRequest) -> Result<HeadlinesResponse, FetchError> {
        let url = request.to_url()?;
        tracing::debug!("Fetching headlines from {}", request.redacted());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkFailure(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkFailure(e.without_url().to_string()))?;

        if !status.is_success() {
            let reason = match self.normalizer.api_error_reason(&body) {
                Some(reason) => format!("HTTP {} ({})", status, reason),
                None => format!("HTTP {}", status),
            };
            return Err(FetchError::NetworkFailure(reason));
        }

        let headlines = self.normalizer.normalize(&body)?;
        tracing::info!("Fetched {} headlines", headlines.len());
        Ok(headlines)
    }
}
