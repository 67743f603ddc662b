pub mod http_fetcher;

use async_trait::async_trait;
use tracing::warn;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

#[async_trait]
pub trait Fetcher {
    /// GET `url` and return the body as text. Non-2xx statuses are errors.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetch `url`, logging and swallowing any failure.
pub async fn fetch_or_log(fetcher: &(dyn Fetcher + Send + Sync), url: &str) -> Option<String> {
    match fetcher.fetch(url).await {
        Ok(body) => Some(body),
        Err(e) => {
            warn!(url = %url, error = %e, "Fetch failed");
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::stub::StubFetcher;
    use super::*;

    #[tokio::test]
    async fn test_fetch_or_log_returns_body() {
        let fetcher = StubFetcher::default().with_page("https://example.com/", "<html></html>");
        let body = fetch_or_log(&fetcher, "https://example.com/").await;
        assert_eq!(body.as_deref(), Some("<html></html>"));
    }

    #[tokio::test]
    async fn test_fetch_or_log_swallows_errors() {
        let fetcher = StubFetcher::default();
        assert!(fetch_or_log(&fetcher, "https://example.com/missing")
            .await
            .is_none());
        assert_eq!(fetcher.requests(), vec!["https://example.com/missing"]);
    }
}
