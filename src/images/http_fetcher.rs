use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{ImageError, ImageFetcher};
use crate::app::NewsError;

pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, ImageError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ImageError::Fetch(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| ImageError::Fetch(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| ImageError::Fetch(e.to_string()))?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::test_support::png_bytes;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpImageFetcher {
        HttpImageFetcher::new(Duration::from_secs(5), "newsdesk-test").unwrap()
    }

    #[tokio::test]
    async fn test_fetch_bytes() {
        let server = MockServer::start().await;
        let png = png_bytes(3, 3, [9, 9, 9]);
        Mock::given(method("GET"))
            .and(path("/thumb.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(png.clone()))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/thumb.png", server.uri())).unwrap();
        let bytes = fetcher().fetch_bytes(&url).await.unwrap();
        assert_eq!(bytes, png);
    }

    #[tokio::test]
    async fn test_not_found_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/missing.png", server.uri())).unwrap();
        let result = fetcher().fetch_bytes(&url).await;
        assert!(matches!(result, Err(ImageError::Fetch(_))));
    }
}
