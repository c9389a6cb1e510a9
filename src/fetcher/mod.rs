pub mod http_fetcher;
pub mod request;

use async_trait::async_trait;

use crate::app::FetchError;
use crate::domain::HeadlinesResponse;

pub use http_fetcher::HttpHeadlineFetcher;
pub use request::HeadlinesRequest;

/// One-shot retrieval of the top headlines.
///
/// Implementations send at most one request per call and never retry.
#[async_trait]
pub trait HeadlineFetcher {
    async fn fetch(&self, request: &HeadlinesRequest) -> Result<HeadlinesResponse, FetchError>;
}
