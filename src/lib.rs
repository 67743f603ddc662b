//! # nakedcap
//!
//! Watches the Naked Capitalism front page for new articles, keeps a local
//! SQLite record of everything seen, and renders articles as markdown.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → ListParser → Store
//!                          ↓
//!             ContentFetcher → Formatter
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # One discovery pass (run it from cron for periodic checks)
//! nakedcap check
//!
//! # Browse what has been stored
//! nakedcap latest --page 2
//! nakedcap search private equity
//!
//! # Markdown for the five newest articles, with full text
//! nakedcap convert --latest 5 --full
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the store,
/// fetcher and [`Monitor`](monitor::Monitor).
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// TOML configuration loaded from `~/.config/nakedcap/config.toml`.
pub mod config;

/// Full-text extraction from article pages.
pub mod content;

/// Core domain models.
///
/// - [`DiscoveredArticle`](domain::DiscoveredArticle): a candidate from the front page
/// - [`Article`](domain::Article): a stored row
/// - [`ArticleStats`](domain::ArticleStats): aggregate counts
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for page fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Markdown documents with derived tags and category.
pub mod formatter;

/// The discovery and conversion pipeline.
pub mod monitor;

/// Front-page link extraction.
pub mod parser;

/// SQLite persistence layer.
///
/// - [`Store`](store::Store): Trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;
