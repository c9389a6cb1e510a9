use std::collections::HashMap;
use std::sync::Arc;

use super::DecodedImage;

/// Decoded images keyed by source URL.
///
/// Unbounded and never evicted; one instance lives as long as the UI session
/// that owns it.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, Arc<DecodedImage>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<Arc<DecodedImage>> {
        self.entries.get(url).cloned()
    }

    /// Store `image` for `url`, replacing any previous entry.
    pub fn insert(&mut self, url: impl Into<String>, image: Arc<DecodedImage>) {
        self.entries.insert(url.into(), image);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
