use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::app::FetchError;
use crate::domain::{HeadlinesResponse, ScreenState};
use crate::fetcher::{HeadlineFetcher, HeadlinesRequest};
use crate::tui::event::AppEvent;
use crate::viewer::{ArticleSession, ArticleViewer};

pub const MISSING_URL_NOTICE: &str = "Url is not present.";

/// Outcome of selecting a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Opened(ArticleSession),
    Notice,
    Ignored,
}

/// The loading / content / error lifecycle of the top headlines.
///
/// Every fetch is tagged with a generation; completions carrying any other
/// generation are stale and dropped.
pub struct HeadlinesScreen {
    state: ScreenState,
    generation: u64,
    fetcher: Arc<dyn HeadlineFetcher + Send + Sync>,
    request: HeadlinesRequest,
    events: UnboundedSender<AppEvent>,
    notice: Option<&'static str>,
}

impl HeadlinesScreen {
    /// Starts in `Loading` and dispatches the first fetch right away.
    pub fn new(
        fetcher: Arc<dyn HeadlineFetcher + Send + Sync>,
        request: HeadlinesRequest,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        let mut screen = Self {
            state: ScreenState::default(),
            generation: 0,
            fetcher,
            request,
            events,
            notice: None,
        };
        screen.dispatch();
        screen
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice
    }

    pub fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    /// Error -> Loading. Ignored in any other state.
    pub fn retry(&mut self) -> bool {
        if !self.state.is_error() {
            return false;
        }
        self.dispatch();
        true
    }

    /// Content -> Loading, replacing the current headlines once the new fetch lands.
    pub fn refresh(&mut self) -> bool {
        if self.state.response().is_none() {
            return false;
        }
        self.dispatch();
        true
    }

    /// Apply a fetch completion. Returns false for stale completions.
    pub fn apply(&mut self, generation: u64, result: Result<HeadlinesResponse, FetchError>) -> bool {
        if generation != self.generation || !self.state.is_loading() {
            tracing::debug!(
                "Dropping stale headlines result (generation {}, current {})",
                generation,
                self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(response) => ScreenState::Content(Arc::new(response)),
            Err(e) => {
                tracing::warn!("Headline fetch failed: {}", e);
                ScreenState::Error(e.to_string())
            }
        };
        true
    }

    /// Open the headline at `index`, or raise the missing-url notice.
    pub fn select(&mut self, index: usize, viewer: &dyn ArticleViewer) -> Selection {
        let Some(headline) = self.state.response().and_then(|r| r.get(index)) else {
            return Selection::Ignored;
        };

        match headline.article_url() {
            Some(url) => Selection::Opened(ArticleSession::open(viewer, url)),
            None => {
                self.notice = Some(MISSING_URL_NOTICE);
                Selection::Notice
            }
        }
    }

    fn dispatch(&mut self) {
        self.generation += 1;
        self.state = ScreenState::Loading;

        // An unbuildable request never reaches the network.
        if let Err(e) = self.request.to_url() {
            tracing::warn!("Cannot build headlines request: {}", e);
            self.state = ScreenState::Error(e.to_string());
            return;
        }

        tracing::info!(
            "Fetching headlines (generation {}) from {}",
            self.generation,
            self.request.redacted()
        );

        let generation = self.generation;
        let fetcher = self.fetcher.clone();
        let request = self.request.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = fetcher.fetch(&request).await;
            let _ = events.send(AppEvent::HeadlinesLoaded { generation, result });
        });
    }
}


#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::test_support::*;
    use super::*;
    use crate::domain::Headline;
    use crate::viewer::test_support::RecordingViewer;

    async fn next_result(
        rx: &mut mpsc::UnboundedReceiver<AppEvent>,
    ) -> (u64, Result<HeadlinesResponse, FetchError>) {
        match rx.recv().await {
            Some(AppEvent::HeadlinesLoaded { generation, result }) => (generation, result),
            other => panic!("expected HeadlinesLoaded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_starts_loading_and_fetches_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let fetcher = ScriptedFetcher::new(vec![Ok(response(vec![linked("A", "https://x")]))]);
        let mut screen = HeadlinesScreen::new(fetcher.clone(), valid_request(), tx);

        assert!(screen.state().is_loading());
        assert_eq!(screen.generation(), 1);

        let (generation, result) = next_result(&mut rx).await;
        assert!(screen.apply(generation, result));
        assert_eq!(screen.state().row_count(), 1);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_then_retry_reaches_content() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let fetcher = ScriptedFetcher::new(vec![
            Err(FetchError::NetworkFailure("offline".into())),
            Ok(response(vec![linked("A", "https://x"), linked("B", "https://y")])),
        ]);
        let mut screen = HeadlinesScreen::new(fetcher.clone(), valid_request(), tx);

        let (generation, result) = next_result(&mut rx).await;
        screen.apply(generation, result);
        assert!(screen.state().is_error());
        assert_eq!(screen.state().row_count(), 0);

        assert!(screen.retry());
        assert!(screen.state().is_loading());

        let (generation, result) = next_result(&mut rx).await;
        screen.apply(generation, result);
        assert_eq!(screen.state().row_count(), 2);
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_decode_failure_is_error_state() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let fetcher = ScriptedFetcher::new(vec![Err(FetchError::DecodeFailure("bad".into()))]);
        let mut screen = HeadlinesScreen::new(fetcher, valid_request(), tx);

        let (generation, result) = next_result(&mut rx).await;
        screen.apply(generation, result);
        assert!(matches!(screen.state(), ScreenState::Error(_)));
    }

    #[tokio::test]
    async fn test_invalid_request_errors_without_fetch() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let fetcher = ScriptedFetcher::new(vec![]);
        let request = HeadlinesRequest::new("https://news.example/v2/top-headlines", "us", None);
        let screen = HeadlinesScreen::new(fetcher.clone(), request, tx);

        assert!(screen.state().is_error());
        tokio::task::yield_now().await;
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_retry_and_refresh_only_from_matching_states() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let fetcher = ScriptedFetcher::new(vec![Ok(response(vec![linked("A", "https://x")]))]);
        let mut screen = HeadlinesScreen::new(fetcher, valid_request(), tx);

        // Loading: neither applies.
        assert!(!screen.retry());
        assert!(!screen.refresh());

        let (generation, result) = next_result(&mut rx).await;
        screen.apply(generation, result);

        // Content: refresh applies, retry does not.
        assert!(!screen.retry());
        assert!(screen.refresh());
        assert!(screen.state().is_loading());
        assert_eq!(screen.generation(), 2);
    }

    #[tokio::test]
    async fn test_stale_completion_is_dropped() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let fetcher = ScriptedFetcher::new(vec![]);
        let mut screen = HeadlinesScreen::new(fetcher, valid_request(), tx);

        let stale = screen.generation();
        screen.apply(stale, Ok(response(vec![linked("A", "https://x")])));
        assert!(screen.refresh());

        let applied = screen.apply(stale, Ok(response(vec![linked("old", "https://old")])));
        assert!(!applied);
        assert!(screen.state().is_loading());
    }

    #[tokio::test]
    async fn test_select_opens_article_url() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut screen = HeadlinesScreen::new(ScriptedFetcher::new(vec![]), valid_request(), tx);
        let generation = screen.generation();
        screen.apply(generation, Ok(response(vec![linked("A", "https://x")])));

        let viewer = RecordingViewer::default();
        let selection = screen.select(0, &viewer);

        assert!(matches!(selection, Selection::Opened(_)));
        assert_eq!(viewer.opened(), vec!["https://x"]);
        assert_eq!(screen.notice(), None);
    }

    #[tokio::test]
    async fn test_select_without_url_raises_one_notice() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut screen = HeadlinesScreen::new(ScriptedFetcher::new(vec![]), valid_request(), tx);
        let generation = screen.generation();
        screen.apply(generation, Ok(response(vec![Headline::new("No link", "S")])));

        let viewer = RecordingViewer::default();
        assert_eq!(screen.select(0, &viewer), Selection::Notice);

        assert!(viewer.opened().is_empty());
        assert_eq!(screen.notice(), Some(MISSING_URL_NOTICE));
        assert_eq!(screen.state().row_count(), 1);
        assert_eq!(screen.generation(), generation);

        assert!(screen.dismiss_notice());
        assert!(!screen.dismiss_notice());
    }

    #[tokio::test]
    async fn test_select_out_of_range_is_ignored() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut screen = HeadlinesScreen::new(ScriptedFetcher::new(vec![]), valid_request(), tx);

        let viewer = RecordingViewer::default();
        assert_eq!(screen.select(0, &viewer), Selection::Ignored);
        assert_eq!(screen.notice(), None);
    }
}
