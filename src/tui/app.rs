use crate::app::FetchError;
use crate::config::KeybindingConfig;
use crate::domain::{HeadlinesResponse, ScreenState};
use crate::images::{ArticleImageLoader, ImageCache, ImageLoaded};
use crate::tui::event::{Action, AppEvent};
use crate::tui::rows::{RowLayout, RowPool};
use crate::tui::screen::{HeadlinesScreen, Selection};
use crate::viewer::{ArticleSession, ArticleViewer};

pub struct TuiApp {
    pub screen: HeadlinesScreen,
    pub rows: RowPool,
    pub cache: ImageCache,
    pub loader: ArticleImageLoader,
    pub selected: usize,
    pub offset: usize,
    pub viewport_height: u16,
    pub article: Option<ArticleSession>,
    pub status_message: Option<String>,
    pub spinner: usize,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(screen: HeadlinesScreen, loader: ArticleImageLoader) -> Self {
        Self {
            screen,
            rows: RowPool::new(),
            cache: ImageCache::new(),
            loader,
            selected: 0,
            offset: 0,
            viewport_height: 0,
            article: None,
            status_message: None,
            spinner: 0,
            should_quit: false,
        }
    }

    pub fn handle_event(
        &mut self,
        event: AppEvent,
        keybindings: &KeybindingConfig,
        viewer: &dyn ArticleViewer,
    ) {
        match event {
            AppEvent::Key(key) => {
                // The notice swallows the key that dismisses it.
                if self.screen.dismiss_notice() {
                    return;
                }
                let action = keybindings.get_action(&key);
                self.handle_action(action, viewer);
            }
            AppEvent::Tick => {
                if self.screen.state().is_loading() {
                    self.spinner = self.spinner.wrapping_add(1);
                }
            }
            AppEvent::HeadlinesLoaded { generation, result } => {
                self.on_headlines(generation, result);
            }
            AppEvent::ImageLoaded(loaded) => self.on_image(loaded),
        }

        self.sync_rows();
    }

    pub fn handle_action(&mut self, action: Action, viewer: &dyn ArticleViewer) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveUp => self.select(self.selected.saturating_sub(1)),
            Action::MoveDown => self.select(self.selected + 1),
            Action::NextPage => self.select(self.selected + self.page_size()),
            Action::PrevPage => self.select(self.selected.saturating_sub(self.page_size())),
            Action::First => self.select(0),
            Action::Last => self.select(self.row_count().saturating_sub(1)),
            Action::OpenArticle => self.open_selected(viewer),
            Action::Refresh => {
                if self.screen.refresh() {
                    self.status_message = Some("Refreshing headlines...".to_string());
                }
            }
            Action::Retry => self.retry(viewer),
            Action::None => {}
        }
    }

    /// Record the list area height and rebind rows for the visible window.
    pub fn sync_viewport(&mut self, height: u16) {
        if self.viewport_height != height {
            self.viewport_height = height;
            self.scroll_to_selection();
        }
        self.sync_rows();
    }

    pub fn row_count(&self) -> usize {
        self.screen.state().row_count()
    }

    /// Headline indices that start inside the list area, in order.
    pub fn visible_indices(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + rows_in_view(self.offset, self.viewport_height, self.row_count(), true)
    }

    fn on_headlines(&mut self, generation: u64, result: Result<HeadlinesResponse, FetchError>) {
        if !self.screen.apply(generation, result) {
            return;
        }

        self.selected = 0;
        self.offset = 0;
        self.status_message = match self.screen.state() {
            ScreenState::Content(response) => Some(format!(
                "Loaded {} headlines at {}",
                response.len(),
                response.fetched_at.with_timezone(&chrono::Local).format("%H:%M")
            )),
            _ => None,
        };
    }

    fn on_image(&mut self, loaded: ImageLoaded) {
        let ImageLoaded { ticket, result } = loaded;
        match result {
            Ok(image) => {
                self.cache.insert(ticket.url.clone(), image.clone());
                tracing::debug!("Cached {} ({} images)", ticket.url, self.cache.len());
                if !self.rows.apply_image(&ticket, image) {
                    tracing::debug!("Row {} moved on before {} arrived", ticket.slot, ticket.url);
                }
            }
            Err(e) => {
                tracing::debug!("Keeping placeholder for {}: {}", ticket.url, e);
            }
        }
    }

    fn select(&mut self, index: usize) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        self.selected = index.min(count - 1);
        self.scroll_to_selection();
    }

    fn open_selected(&mut self, viewer: &dyn ArticleViewer) {
        if let Selection::Opened(session) = self.screen.select(self.selected, viewer) {
            self.status_message = None;
            self.article = Some(session);
        }
    }

    fn retry(&mut self, viewer: &dyn ArticleViewer) {
        if self.screen.retry() {
            self.status_message = None;
            return;
        }

        if let Some(article) = self.article.as_mut().filter(|a| a.failed()) {
            article.retry(viewer);
        }
    }

    fn page_size(&self) -> usize {
        rows_in_view(self.offset, self.viewport_height, self.row_count(), false).max(1)
    }

    fn scroll_to_selection(&mut self) {
        if self.selected < self.offset {
            self.offset = self.selected;
        }
        while self.offset < self.selected {
            let fits = rows_in_view(self.offset, self.viewport_height, self.row_count(), false);
            if self.selected < self.offset + fits.max(1) {
                break;
            }
            self.offset += 1;
        }
    }

    fn sync_rows(&mut self) {
        let visible = self.visible_indices().len();
        let response = self.screen.state().response().cloned();
        self.rows.sync(
            response.as_deref(),
            self.offset,
            visible,
            &self.cache,
            &self.loader,
        );
    }
}

/// Rows that fit in `height` cells starting at `offset`; with `partial`, a
/// row cut off at the bottom counts too.
fn rows_in_view(offset: usize, height: u16, total: usize, partial: bool) -> usize {
    let mut used: u16 = 0;
    let mut count = 0;

    for index in offset..total {
        if used >= height {
            break;
        }
        let row_height = RowLayout::for_index(index).height();
        if !partial && used.saturating_add(row_height) > height {
            break;
        }
        used = used.saturating_add(row_height);
        count += 1;
    }

    count
}
