pub mod sqlite;

use crate::app::Result;
use crate::domain::{Article, ArticleStats, DiscoveredArticle};

pub use sqlite::SqliteStore;

pub trait Store {
    /// Insert-or-ignore keyed by URL. Returns the inputs that were actually
    /// inserted, in input order.
    fn save_articles(&self, articles: &[DiscoveredArticle]) -> Result<Vec<DiscoveredArticle>>;

    fn get_article(&self, id: i64) -> Result<Option<Article>>;
    fn get_article_by_url(&self, url: &str) -> Result<Option<Article>>;
    fn latest_articles(&self, limit: usize, offset: usize) -> Result<Vec<Article>>;
    fn count_articles(&self) -> Result<i64>;
    fn search_articles(&self, query: &str, limit: usize) -> Result<Vec<Article>>;
    fn stats(&self) -> Result<ArticleStats>;
}
