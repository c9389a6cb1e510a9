//! # Newsdesk
//!
//! A terminal reader for top news headlines.
//!
//! ## Architecture
//!
//! ```text
//! HeadlineFetcher → Normalizer → HeadlinesScreen → RowPool → ArticleImageLoader
//!                                       │
//!                                       └→ ArticleViewer
//! ```
//!
//! Background work (headline fetches, image downloads, terminal input) reports
//! back to the UI loop as [`AppEvent`](tui::event::AppEvent)s on a single
//! channel. Only the UI loop mutates screen state, rows and the image cache.
//!
//! ## Quick Start
//!
//! ```bash
//! export NEWSDESK_API_KEY=...
//!
//! # Launch the TUI
//! newsdesk
//!
//! # Print today's headlines for Great Britain
//! newsdesk headlines --country gb
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config, the
/// resolved request and the HTTP clients.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui` (default) - Launch the TUI
/// - `headlines [--json]` - Fetch once and print
/// - `config-path` - Show where the config file lives
pub mod cli;

/// Configuration loaded from `~/.config/newsdesk/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Headline`](domain::Headline): One article summary
/// - [`HeadlinesResponse`](domain::HeadlinesResponse): Ordered headlines of one fetch
/// - [`ScreenState`](domain::ScreenState): Loading / content / error
pub mod domain;

/// Headline retrieval.
///
/// - [`HeadlineFetcher`](fetcher::HeadlineFetcher): Async trait for fetching
/// - [`HttpHeadlineFetcher`](fetcher::HttpHeadlineFetcher): reqwest-based implementation
pub mod fetcher;

/// Thumbnail fetching, decoding and caching.
pub mod images;

/// Parses newsapi.org JSON into [`HeadlinesResponse`](domain::HeadlinesResponse).
pub mod normalizer;

/// Terminal user interface built with ratatui.
///
/// Keybindings: j/k navigate, n/p page, Enter opens the article,
/// R refreshes, r retries, q quits.
pub mod tui;

/// Hands article URLs to the system browser.
pub mod viewer;
