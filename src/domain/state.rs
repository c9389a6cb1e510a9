use std::sync::Arc;

use super::HeadlinesResponse;

/// What the headlines screen is showing. Exactly one at a time.
#[derive(Debug, Clone, Default)]
pub enum ScreenState {
    #[default]
    Loading,
    Content(Arc<HeadlinesResponse>),
    Error(String),
}

impl ScreenState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ScreenState::Error(_))
    }

    pub fn response(&self) -> Option<&Arc<HeadlinesResponse>> {
        match self {
            ScreenState::Content(response) => Some(response),
            _ => None,
        }
    }

    /// Number of list rows to render; zero unless showing content.
    pub fn row_count(&self) -> usize {
        self.response().map(|r| r.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Headline;

    #[test]
    fn test_default_is_loading() {
        let state = ScreenState::default();
        assert!(state.is_loading());
        assert!(!state.is_error());
        assert_eq!(state.row_count(), 0);
    }

    #[test]
    fn test_only_content_has_rows() {
        let response = HeadlinesResponse::new(vec![Headline::new("A", "S"), Headline::new("B", "S")]);
        assert_eq!(ScreenState::Content(Arc::new(response)).row_count(), 2);
        assert_eq!(ScreenState::Error("offline".into()).row_count(), 0);
    }
}
