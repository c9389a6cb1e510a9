use std::sync::Arc;

use crate::domain::{Headline, HeadlinesResponse};
use crate::images::{ArticleImageLoader, DecodedImage, ImageCache, ImageLoad, ImageTicket};

/// Large rows show the image above the text, compact rows beside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowLayout {
    Large,
    #[default]
    Compact,
}

impl RowLayout {
    pub fn for_index(index: usize) -> Self {
        if index == 0 {
            RowLayout::Large
        } else {
            RowLayout::Compact
        }
    }

    /// Height in terminal cells, borders included.
    pub fn height(self) -> u16 {
        match self {
            RowLayout::Large => 16,
            RowLayout::Compact => 7,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum RowImage {
    #[default]
    Placeholder,
    Pending,
    Loaded(Arc<DecodedImage>),
}

impl RowImage {
    pub fn decoded(&self) -> Option<&DecodedImage> {
        match self {
            RowImage::Loaded(image) => Some(image),
            _ => None,
        }
    }
}

/// A recyclable row view-model.
#[derive(Debug, Default)]
pub struct HeadlineRow {
    pub index: Option<usize>,
    pub headline: Option<Arc<Headline>>,
    pub title: String,
    pub description: String,
    pub byline: String,
    pub image: RowImage,
    pub layout: RowLayout,
    bind_generation: u64,
    image_url: Option<String>,
}

impl HeadlineRow {
    /// Clear everything shown by the previous binding and invalidate its image ticket.
    pub fn reset(&mut self) {
        self.index = None;
        self.headline = None;
        self.title.clear();
        self.description.clear();
        self.byline.clear();
        self.image = RowImage::Placeholder;
        self.layout = RowLayout::default();
        self.image_url = None;
        self.bind_generation += 1;
    }

    pub fn bind(
        &mut self,
        slot: usize,
        index: usize,
        headline: &Arc<Headline>,
        cache: &ImageCache,
        loader: &ArticleImageLoader,
    ) {
        self.reset();

        self.index = Some(index);
        self.headline = Some(headline.clone());
        self.title = headline.title.clone();
        self.description = headline.summary();
        self.byline = headline.byline();
        self.layout = RowLayout::for_index(index);

        let url = headline.image_url.as_deref();
        self.image = match loader.load(cache, url, slot, self.bind_generation) {
            ImageLoad::Placeholder => RowImage::Placeholder,
            ImageLoad::Ready(image) => RowImage::Loaded(image),
            ImageLoad::Pending => {
                self.image_url = url.map(|u| u.trim().to_string());
                RowImage::Pending
            }
        };
    }

    pub fn bind_generation(&self) -> u64 {
        self.bind_generation
    }

    /// Whether this row still waits for the image `ticket` was issued for.
    pub fn awaits(&self, ticket: &ImageTicket) -> bool {
        self.bind_generation == ticket.bind_generation
            && self.image_url.as_deref() == Some(ticket.url.as_str())
    }

    fn is_bound_to(&self, index: usize, headline: &Arc<Headline>) -> bool {
        self.index == Some(index)
            && self
                .headline
                .as_ref()
                .is_some_and(|bound| Arc::ptr_eq(bound, headline))
    }
}

/// Rows bound to the visible window of the headline list.
///
/// Rows are keyed by headline index, not by position: scrolling frees the
/// rows that leave the window and binds only the headlines that enter it.
#[derive(Debug, Default)]
pub struct RowPool {
    rows: Vec<HeadlineRow>,
}

impl RowPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind headlines `offset..offset + visible`, leaving rows that already
    /// show one of them untouched.
    pub fn sync(
        &mut self,
        response: Option<&HeadlinesResponse>,
        offset: usize,
        visible: usize,
        cache: &ImageCache,
        loader: &ArticleImageLoader,
    ) {
        let window = offset..offset + visible;

        for row in &mut self.rows {
            let Some(index) = row.index else {
                continue;
            };
            let keep = window.contains(&index)
                && response
                    .and_then(|r| r.get(index))
                    .is_some_and(|headline| row.is_bound_to(index, headline));
            if !keep {
                row.reset();
            }
        }

        let Some(response) = response else {
            return;
        };

        for index in window {
            let Some(headline) = response.get(index) else {
                break;
            };
            if self.row_for_index(index).is_some() {
                continue;
            }

            let slot = match self.rows.iter().position(|row| row.index.is_none()) {
                Some(slot) => slot,
                None => {
                    self.rows.push(HeadlineRow::default());
                    self.rows.len() - 1
                }
            };
            self.rows[slot].bind(slot, index, headline, cache, loader);
        }
    }

    /// Deliver a finished image to the row that asked for it, if it still wants it.
    pub fn apply_image(&mut self, ticket: &ImageTicket, image: Arc<DecodedImage>) -> bool {
        match self.rows.get_mut(ticket.slot) {
            Some(row) if row.awaits(ticket) => {
                row.image = RowImage::Loaded(image);
                row.image_url = None;
                true
            }
            _ => false,
        }
    }

    pub fn rows(&self) -> &[HeadlineRow] {
        &self.rows
    }

    pub fn row_for_index(&self, index: usize) -> Option<&HeadlineRow> {
        self.rows.iter().find(|row| row.index == Some(index))
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::images::test_support::{png_bytes, StubImageFetcher};
    use crate::tui::event::AppEvent;

    fn headline(title: &str, image: Option<&str>) -> Headline {
        let mut headline = Headline::new(title, "Wire");
        headline.description = Some(format!("{} description", title));
        headline.author = Some("Ann".into());
        headline.image_url = image.map(str::to_string);
        headline
    }

    #[tokio::test]
    async fn test_rebinding_clears_previous_content() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let loader = ArticleImageLoader::disabled(tx);
        let mut cache = ImageCache::new();
        let image = Arc::new(DecodedImage::decode(&png_bytes(2, 2, [9, 9, 9]), 96).unwrap());
        cache.insert("https://img/a.png", image);

        let first = Arc::new(headline("First", Some("https://img/a.png")));
        let mut bare = Headline::new("Second", "Other");
        bare.description = None;
        let second = Arc::new(bare);

        let mut row = HeadlineRow::default();
        row.bind(0, 0, &first, &cache, &loader);
        assert_eq!(row.title, "First");
        assert_eq!(row.byline, "- Ann | Wire");
        assert_eq!(row.layout, RowLayout::Large);
        assert!(row.image.decoded().is_some());

        row.bind(0, 4, &second, &cache, &loader);
        assert_eq!(row.title, "Second");
        assert_eq!(row.description, "");
        assert_eq!(row.byline, "- Other");
        assert_eq!(row.layout, RowLayout::Compact);
        assert!(matches!(row.image, RowImage::Placeholder));
    }

    #[tokio::test]
    async fn test_stale_image_not_applied_after_rebind() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let loader = ArticleImageLoader::new(StubImageFetcher::ok(), tx, 96);
        let cache = ImageCache::new();
        let response = HeadlinesResponse::new(vec![
            headline("A", Some("https://img/a.png")),
            headline("B", None),
        ]);

        let mut pool = RowPool::new();
        pool.sync(Some(&response), 0, 1, &cache, &loader);
        assert!(matches!(pool.rows()[0].image, RowImage::Pending));

        // Scroll so the row is recycled for headline 1 before the image arrives.
        pool.sync(Some(&response), 1, 1, &cache, &loader);

        let loaded = match rx.recv().await {
            Some(AppEvent::ImageLoaded(loaded)) => loaded,
            _ => panic!("expected an image"),
        };
        let image = loaded.result.unwrap();
        assert!(!pool.apply_image(&loaded.ticket, image));
        assert!(pool.row_for_index(0).is_none());
        assert_eq!(pool.rows().len(), 1);
        assert!(matches!(pool.rows()[0].image, RowImage::Placeholder));
        assert_eq!(pool.rows()[0].title, "B");
    }

    #[tokio::test]
    async fn test_matching_ticket_applies_image() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let loader = ArticleImageLoader::new(StubImageFetcher::ok(), tx, 96);
        let cache = ImageCache::new();
        let response = HeadlinesResponse::new(vec![headline("A", Some("https://img/a.png"))]);

        let mut pool = RowPool::new();
        pool.sync(Some(&response), 0, 3, &cache, &loader);

        let Some(AppEvent::ImageLoaded(loaded)) = rx.recv().await else {
            panic!("expected an image");
        };
        assert!(pool.apply_image(&loaded.ticket, loaded.result.unwrap()));
        assert!(pool.row_for_index(0).unwrap().image.decoded().is_some());
    }

    #[tokio::test]
    async fn test_sync_keeps_bound_rows() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let fetcher = StubImageFetcher::ok();
        let loader = ArticleImageLoader::new(fetcher.clone(), tx, 96);
        let cache = ImageCache::new();
        let response = HeadlinesResponse::new(vec![
            headline("A", Some("https://img/a.png")),
            headline("B", Some("https://img/b.png")),
        ]);

        let mut pool = RowPool::new();
        pool.sync(Some(&response), 0, 2, &cache, &loader);
        let generation = pool.rows()[0].bind_generation();

        pool.sync(Some(&response), 0, 2, &cache, &loader);
        assert_eq!(pool.rows()[0].bind_generation(), generation);

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_sync_without_content_unbinds_everything() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let loader = ArticleImageLoader::disabled(tx);
        let cache = ImageCache::new();
        let response = HeadlinesResponse::new(vec![headline("A", None), headline("B", None)]);

        let mut pool = RowPool::new();
        pool.sync(Some(&response), 0, 4, &cache, &loader);
        assert!(pool.row_for_index(1).is_some());
        assert!(pool.row_for_index(2).is_none());
        assert_eq!(pool.rows().len(), 2);

        pool.sync(None, 0, 4, &cache, &loader);
        assert!(pool.rows().iter().all(|row| row.index.is_none() && row.title.is_empty()));
    }

    #[tokio::test]
    async fn test_scrolling_rebinds_only_entering_rows() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let fetcher = StubImageFetcher::ok();
        let loader = ArticleImageLoader::new(fetcher.clone(), tx, 96);
        let cache = ImageCache::new();
        let response = HeadlinesResponse::new(
            (0..4)
                .map(|i| headline(&format!("H{}", i), Some(&format!("https://img/{}.png", i))))
                .collect(),
        );

        let mut pool = RowPool::new();
        pool.sync(Some(&response), 0, 3, &cache, &loader);
        let kept: Vec<u64> = [1, 2]
            .iter()
            .map(|&i| pool.row_for_index(i).unwrap().bind_generation())
            .collect();

        pool.sync(Some(&response), 1, 3, &cache, &loader);

        assert!(pool.row_for_index(0).is_none());
        assert_eq!(pool.row_for_index(1).unwrap().bind_generation(), kept[0]);
        assert_eq!(pool.row_for_index(2).unwrap().bind_generation(), kept[1]);
        assert_eq!(pool.row_for_index(3).unwrap().title, "H3");
        assert_eq!(pool.rows().len(), 3);

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(fetcher.calls(), 4);
    }
}
