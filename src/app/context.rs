use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::app::error::Result;
use crate::config::{Config, Overrides, API_KEY_ENV};
use crate::fetcher::{HeadlineFetcher, HeadlinesRequest, HttpHeadlineFetcher};
use crate::images::{ArticleImageLoader, HttpImageFetcher, ImageFetcher};
use crate::tui::event::AppEvent;

/// Wires configuration, the resolved request and the network clients together.
pub struct AppContext {
    pub config: Config,
    pub request: HeadlinesRequest,
    pub headline_fetcher: Arc<dyn HeadlineFetcher + Send + Sync>,
    pub image_fetcher: Option<Arc<dyn ImageFetcher + Send + Sync>>,
}

impl AppContext {
    pub fn new(config: Config, overrides: &Overrides) -> Result<Self> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        let request = config.headlines_request(overrides, env_key);

        let headline_fetcher: Arc<dyn HeadlineFetcher + Send + Sync> = Arc::new(
            HttpHeadlineFetcher::with_options(config.news.timeout(), &config.news.user_agent)?,
        );

        let image_fetcher: Option<Arc<dyn ImageFetcher + Send + Sync>> = if config.images.enabled {
            Some(Arc::new(HttpImageFetcher::new(
                config.images.timeout(),
                &config.news.user_agent,
            )?))
        } else {
            None
        };

        Ok(Self {
            config,
            request,
            headline_fetcher,
            image_fetcher,
        })
    }

    pub fn image_loader(&self, events: UnboundedSender<AppEvent>) -> ArticleImageLoader {
        match &self.image_fetcher {
            Some(fetcher) => {
                ArticleImageLoader::new(fetcher.clone(), events, self.config.images.max_dimension)
            }
            None => ArticleImageLoader::disabled(events),
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::images::{ImageCache, ImageLoad};

    #[test]
    fn test_overrides_reach_request() {
        let overrides = Overrides {
            country: Some("fr".into()),
            api_key: Some("flag-key".into()),
        };
        let ctx = AppContext::new(Config::default(), &overrides).unwrap();

        assert_eq!(ctx.request.country, "fr");
        assert_eq!(ctx.request.api_key.as_deref(), Some("flag-key"));
        assert!(ctx.image_fetcher.is_some());
    }

    #[tokio::test]
    async fn test_disabled_images_give_placeholder_loader() {
        let mut config = Config::default();
        config.images.enabled = false;
        let ctx = AppContext::new(config, &Overrides::default()).unwrap();
        assert!(ctx.image_fetcher.is_none());

        let (tx, _rx) = mpsc::unbounded_channel();
        let loader = ctx.image_loader(tx);
        assert!(matches!(
            loader.load(&ImageCache::new(), Some("https://img/a.png"), 0, 1),
            ImageLoad::Placeholder
        ));
    }
}
