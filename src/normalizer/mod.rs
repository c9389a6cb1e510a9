use html_escape::decode_html_entities;
use serde::Deserialize;

use crate::app::FetchError;
use crate::domain::{Headline, HeadlinesResponse};

#[derive(Debug, Deserialize)]
struct ArticlesPayload {
    articles: Vec<ArticlePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticlePayload {
    title: String,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    author: Option<String>,
    source: SourcePayload,
}

#[derive(Debug, Deserialize)]
struct SourcePayload {
    name: String,
}

/// Error body newsapi sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    code: Option<String>,
    message: Option<String>,
}

/// Converts a top-headlines JSON body into [`HeadlinesResponse`].
///
/// Either every article decodes or the whole body is rejected; optional
/// fields that are absent or `null` are simply left unset.
#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &[u8]) -> Result<HeadlinesResponse, FetchError> {
        let payload: ArticlesPayload = serde_json::from_slice(body)
            .map_err(|e| FetchError::DecodeFailure(e.to_string()))?;

        let headlines = payload
            .articles
            .into_iter()
            .map(|article| Headline {
                title: decode_html_entities(&article.title).to_string(),
                description: article.description,
                url: non_blank(article.url),
                image_url: non_blank(article.url_to_image),
                author: non_blank(article.author)
                    .map(|a| decode_html_entities(&a).to_string()),
                source_name: article.source.name,
            })
            .collect();

        Ok(HeadlinesResponse::new(headlines))
    }

    /// Best-effort reason extracted from an error body, for logs.
    pub fn api_error_reason(&self, body: &[u8]) -> Option<String> {
        let payload: ApiErrorPayload = serde_json::from_slice(body).ok()?;
        match (payload.code, payload.message) {
            (Some(code), Some(message)) => Some(format!("{}: {}", code, message)),
            (None, Some(message)) => Some(message),
            (Some(code), None) => Some(code),
            (None, None) => None,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
