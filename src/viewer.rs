//! Hand-off of an article URL to something that can display it.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not open {url}: {reason}")]
pub struct ViewerError {
    pub url: String,
    pub reason: String,
}

/// Displays a web page. Only success or failure comes back.
pub trait ArticleViewer {
    fn open(&self, url: &str) -> Result<(), ViewerError>;
}

/// Opens articles in the user's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserViewer;

impl ArticleViewer for BrowserViewer {
    fn open(&self, url: &str) -> Result<(), ViewerError> {
        open::that(url).map_err(|e| ViewerError {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerStatus {
    Opened,
    Failed(String),
}

/// The last article handed to the viewer and how that went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSession {
    pub url: String,
    pub status: ViewerStatus,
}

impl ArticleSession {
    pub fn open(viewer: &dyn ArticleViewer, url: &str) -> Self {
        let status = match viewer.open(url) {
            Ok(()) => {
                tracing::info!("Opened article {}", url);
                ViewerStatus::Opened
            }
            Err(e) => {
                tracing::warn!("{}", e);
                ViewerStatus::Failed(e.reason)
            }
        };

        Self {
            url: url.to_string(),
            status,
        }
    }

    pub fn failed(&self) -> bool {
        matches!(self.status, ViewerStatus::Failed(_))
    }

    /// Try the same URL again.
    pub fn retry(&mut self, viewer: &dyn ArticleViewer) {
        *self = Self::open(viewer, &self.url.clone());
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;

    use super::*;

    /// Records every URL it is asked to open.
    #[derive(Default)]
    pub struct RecordingViewer {
        pub opened: RefCell<Vec<String>>,
        pub fail: bool,
    }

    impl RecordingViewer {
        pub fn failing() -> Self {
            Self {
                opened: RefCell::new(Vec::new()),
                fail: true,
            }
        }

        pub fn opened(&self) -> Vec<String> {
            self.opened.borrow().clone()
        }
    }

    impl ArticleViewer for RecordingViewer {
        fn open(&self, url: &str) -> Result<(), ViewerError> {
            self.opened.borrow_mut().push(url.to_string());
            if self.fail {
                Err(ViewerError {
                    url: url.to_string(),
                    reason: "no browser".into(),
                })
            } else {
                Ok(())
            }
        }
    }
}
