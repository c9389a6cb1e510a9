use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use super::{parse_image_url, DecodedImage, ImageCache, ImageError, ImageFetcher};
use crate::tui::event::AppEvent;

/// Identifies the row binding that asked for an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTicket {
    pub slot: usize,
    pub bind_generation: u64,
    pub url: String,
}

/// Completion of a background image load, delivered to the UI loop.
#[derive(Debug, Clone)]
pub struct ImageLoaded {
    pub ticket: ImageTicket,
    pub result: Result<Arc<DecodedImage>, ImageError>,
}

/// What a row should display right now.
#[derive(Debug, Clone)]
pub enum ImageLoad {
    /// No usable URL; the placeholder is final.
    Placeholder,
    /// Cache hit.
    Ready(Arc<DecodedImage>),
    /// Placeholder for now; an [`ImageLoaded`] event will follow.
    Pending,
}

pub struct ArticleImageLoader {
    fetcher: Option<Arc<dyn ImageFetcher + Send + Sync>>,
    events: UnboundedSender<AppEvent>,
    max_dimension: u32,
}

impl ArticleImageLoader {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher + Send + Sync>,
        events: UnboundedSender<AppEvent>,
        max_dimension: u32,
    ) -> Self {
        Self {
            fetcher: Some(fetcher),
            events,
            max_dimension,
        }
    }

    /// A loader that never fetches; every uncached image stays a placeholder.
    pub fn disabled(events: UnboundedSender<AppEvent>) -> Self {
        Self {
            fetcher: None,
            events,
            max_dimension: super::DEFAULT_MAX_DIMENSION,
        }
    }

    /// Resolve the image for one row binding.
    ///
    /// Must be called from within a tokio runtime when a fetch may be needed.
    pub fn load(
        &self,
        cache: &ImageCache,
        url: Option<&str>,
        slot: usize,
        bind_generation: u64,
    ) -> ImageLoad {
        let Some(parsed) = parse_image_url(url) else {
            return ImageLoad::Placeholder;
        };
        let key = url.unwrap_or_default().trim().to_string();

        if let Some(image) = cache.get(&key) {
            return ImageLoad::Ready(image);
        }

        let Some(fetcher) = self.fetcher.clone() else {
            return ImageLoad::Placeholder;
        };

        let ticket = ImageTicket {
            slot,
            bind_generation,
            url: key,
        };
        let events = self.events.clone();
        let max_dimension = self.max_dimension;

        tokio::spawn(async move {
            let result = match fetcher.fetch_bytes(&parsed).await {
                Ok(bytes) => tokio::task::spawn_blocking(move || {
                    DecodedImage::decode(&bytes, max_dimension)
                })
                .await
                .unwrap_or_else(|e| Err(ImageError::Decode(e.to_string()))),
                Err(e) => Err(e),
            };

            // The UI may already be gone; nothing to deliver to then.
            let _ = events.send(AppEvent::ImageLoaded(ImageLoaded {
                ticket,
                result: result.map(Arc::new),
            }));
        });

        ImageLoad::Pending
    }
}
