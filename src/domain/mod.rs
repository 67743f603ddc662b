pub mod article;
pub mod stats;

pub use article::{today, Article, DiscoveredArticle, UNKNOWN_AUTHOR};
pub use stats::ArticleStats;
