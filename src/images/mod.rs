//! Thumbnail loading for headline rows.
//!
//! ```text
//! row bind → ArticleImageLoader → (cache hit | background fetch + decode) → AppEvent::ImageLoaded
//! ```
//!
//! The [`ImageCache`] is only written from the UI loop when an
//! [`ImageLoaded`] event is handled, so it needs no synchronization.

mod cache;
mod http_fetcher;
mod loader;

pub use cache::ImageCache;
pub use http_fetcher::HttpImageFetcher;
pub use loader::{ArticleImageLoader, ImageLoad, ImageLoaded, ImageTicket};

use async_trait::async_trait;
use image::imageops::FilterType;
use image::RgbImage;
use thiserror::Error;
use url::Url;

pub const DEFAULT_MAX_DIMENSION: u32 = 96;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("image fetch failed: {0}")]
    Fetch(String),

    #[error("image decode failed: {0}")]
    Decode(String),
}

/// Retrieves raw image bytes.
#[async_trait]
pub trait ImageFetcher {
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, ImageError>;
}

/// A decoded, already downscaled RGB image.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pixels: RgbImage,
}

impl DecodedImage {
    /// Decode `bytes` and shrink the result to fit within `max_dimension`.
    pub fn decode(bytes: &[u8], max_dimension: u32) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Decode("empty body".into()));
        }

        let image =
            image::load_from_memory(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;

        let max_dimension = max_dimension.max(1);
        let image = if image.width() > max_dimension || image.height() > max_dimension {
            image.thumbnail(max_dimension, max_dimension)
        } else {
            image
        };

        Ok(Self {
            pixels: image.to_rgb8(),
        })
    }

    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Resample to exactly `width` x `height` pixels.
    pub fn resampled(&self, width: u32, height: u32) -> RgbImage {
        image::imageops::resize(&self.pixels, width.max(1), height.max(1), FilterType::Triangle)
    }
}

/// Does `url` point at something worth fetching?
pub fn parse_image_url(url: Option<&str>) -> Option<Url> {
    let raw = url?.trim();
    if raw.is_empty() {
        return None;
    }
    Url::parse(raw)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}
