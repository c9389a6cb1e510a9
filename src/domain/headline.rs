use std::sync::Arc;

use chrono::{DateTime, Utc};
use html_escape::decode_html_entities;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub source_name: String,
}

impl Headline {
    pub fn new(title: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            url: None,
            image_url: None,
            author: None,
            source_name: source_name.into(),
        }
    }

    /// The article link, if it is something a browser can actually open.
    pub fn article_url(&self) -> Option<&str> {
        let raw = self.url.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Some(raw),
            _ => None,
        }
    }

    /// "- author | source", or "- source" when there is no author.
    pub fn byline(&self) -> String {
        match self.author.as_deref().map(str::trim) {
            Some(author) if !author.is_empty() => {
                format!("- {} | {}", author, self.source_name)
            }
            _ => format!("- {}", self.source_name),
        }
    }

    /// Description as plain text. Empty when there is none.
    pub fn summary(&self) -> String {
        self.description
            .as_deref()
            .map(plain_text)
            .unwrap_or_default()
    }
}

/// Headlines in the order the API returned them.
#[derive(Debug, Clone, Serialize)]
pub struct HeadlinesResponse {
    pub headlines: Vec<Arc<Headline>>,
    pub fetched_at: DateTime<Utc>,
}

impl HeadlinesResponse {
    pub fn new(headlines: Vec<Headline>) -> Self {
        Self {
            headlines: headlines.into_iter().map(Arc::new).collect(),
            fetched_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.headlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headlines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Headline>> {
        self.headlines.get(index)
    }
}

fn plain_text(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;
    let mut last_was_space = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => {
                if c.is_whitespace() {
                    if !last_was_space {
                        result.push(' ');
                        last_was_space = true;
                    }
                } else {
                    result.push(c);
                    last_was_space = false;
                }
            }
            _ => {}
        }
    }

    decode_html_entities(result.trim()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_url_accepts_http_links() {
        let mut headline = Headline::new("A", "S");
        headline.url = Some("https://x".into());
        assert_eq!(headline.article_url(), Some("https://x"));
    }

    #[test]
    fn test_article_url_rejects_missing_blank_and_relative() {
        let mut headline = Headline::new("A", "S");
        assert_eq!(headline.article_url(), None);

        headline.url = Some("   ".into());
        assert_eq!(headline.article_url(), None);

        headline.url = Some("/news/123".into());
        assert_eq!(headline.article_url(), None);

        headline.url = Some("mailto:desk@example.com".into());
        assert_eq!(headline.article_url(), None);
    }

    #[test]
    fn test_byline_with_author() {
        let mut headline = Headline::new("A", "Reuters");
        headline.author = Some("Jane Doe".into());
        assert_eq!(headline.byline(), "- Jane Doe | Reuters");
    }

    #[test]
    fn test_byline_without_author() {
        let mut headline = Headline::new("A", "Reuters");
        assert_eq!(headline.byline(), "- Reuters");

        headline.author = Some("  ".into());
        assert_eq!(headline.byline(), "- Reuters");
    }

    #[test]
    fn test_summary_strips_markup() {
        let mut headline = Headline::new("A", "S");
        headline.description = Some("<p>Rates   held</p> &amp; <b>steady</b>".into());
        assert_eq!(headline.summary(), "Rates held & steady");
    }

    #[test]
    fn test_summary_empty_without_description() {
        let headline = Headline::new("A", "S");
        assert_eq!(headline.summary(), "");
    }

    #[test]
    fn test_response_preserves_order() {
        let response = HeadlinesResponse::new(vec![
            Headline::new("first", "S"),
            Headline::new("second", "S"),
            Headline::new("third", "S"),
        ]);
        let titles: Vec<_> = response.headlines.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }
}
