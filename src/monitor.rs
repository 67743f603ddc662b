use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::app::{NakedcapError, Result};
use crate::config::Config;
use crate::content::ContentFetcher;
use crate::domain::DiscoveredArticle;
use crate::fetcher::{fetch_or_log, Fetcher};
use crate::formatter::{format_document, FormattedDocument};
use crate::parser::ListParser;
use crate::store::Store;

/// Discovery and conversion pipeline for one site.
pub struct Monitor {
    base_url: String,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    parser: ListParser,
    store: Arc<dyn Store + Send + Sync>,
    content: ContentFetcher,
    batch_delay: Duration,
}

impl Monitor {
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        store: Arc<dyn Store + Send + Sync>,
    ) -> Result<Self> {
        Ok(Self {
            base_url: config.site.base_url.clone(),
            parser: ListParser::new(&config.site.base_url)?,
            content: ContentFetcher::new(fetcher.clone(), &config.content)?,
            fetcher,
            store,
            batch_delay: config.convert.batch_delay(),
        })
    }

    pub fn store(&self) -> &(dyn Store + Send + Sync) {
        self.store.as_ref()
    }

    /// Poll the front page once and store anything not seen before.
    /// An unreachable site yields no new articles rather than an error.
    pub async fn check_for_new_articles(&self) -> Result<Vec<DiscoveredArticle>> {
        let Some(html) = fetch_or_log(self.fetcher.as_ref(), &self.base_url).await else {
            return Ok(Vec::new());
        };

        let found = self.parser.parse(&html);
        let new_articles = self.store.save_articles(&found)?;

        info!(
            found = found.len(),
            count = new_articles.len(),
            "Checked for new articles"
        );
        for article in &new_articles {
            info!(title = %article.title, url = %article.url, "New article");
        }

        Ok(new_articles)
    }

    pub async fn fetch_content(&self, url: &str) -> Option<String> {
        self.content.fetch_content(url).await
    }

    pub async fn convert_article(&self, id: i64, with_full_text: bool) -> Result<FormattedDocument> {
        let article = self
            .store
            .get_article(id)?
            .ok_or(NakedcapError::ArticleNotFound(id))?;

        let full_text = if with_full_text {
            self.fetch_content(&article.url).await
        } else {
            None
        };

        Ok(format_document(&article, full_text.as_deref()))
    }

    /// Convert the newest `limit` articles, pausing between full-text fetches.
    pub async fn convert_latest(
        &self,
        limit: usize,
        with_full_text: bool,
    ) -> Result<Vec<FormattedDocument>> {
        let articles = self.store.latest_articles(limit, 0)?;
        let mut documents = Vec::with_capacity(articles.len());

        for (i, article) in articles.iter().enumerate() {
            let full_text = if with_full_text {
                if i > 0 && !self.batch_delay.is_zero() {
                    tokio::time::sleep(self.batch_delay).await;
                }
                let text = self.fetch_content(&article.url).await;
                if text.is_none() {
                    warn!(url = %article.url, "Converting without full text");
                }
                text
            } else {
                None
            };

            documents.push(format_document(article, full_text.as_deref()));
        }

        info!(count = documents.len(), "Converted articles");
        Ok(documents)
    }
}
