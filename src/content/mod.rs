//! Full-text retrieval for a single article page.

pub mod config;
pub mod extractor;

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::Result;
use crate::fetcher::{fetch_or_log, Fetcher};

pub use config::ContentConfig;
pub use extractor::{ContentExtractor, TRUNCATION_MARKER};

pub struct ContentFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    extractor: ContentExtractor,
}

impl ContentFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, config: &ContentConfig) -> Result<Self> {
        Ok(Self {
            fetcher,
            extractor: ContentExtractor::new(config)?,
        })
    }

    /// Fetch `url` and extract its body text. Fetch failures and pages
    /// without a recognizable body both yield `None`.
    pub async fn fetch_content(&self, url: &str) -> Option<String> {
        let html = fetch_or_log(self.fetcher.as_ref(), url).await?;

        match self.extractor.extract(&html) {
            Some(text) => {
                info!(url = %url, chars = text.chars().count(), "Extracted article content");
                Some(text)
            }
            None => {
                debug!(url = %url, "No article content found");
                None
            }
        }
    }
}
