use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::app::Result;
use crate::config::SiteConfig;
use crate::fetcher::Fetcher;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(site: &SiteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(site.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(site.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;

        let body = response.text().await?;
        debug!(url = %url, bytes = body.len(), "Fetched page");

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_with_default_site_config() {
        assert!(HttpFetcher::new(&SiteConfig::default()).is_ok());
    }
}
