use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

// --- PageFetcher trait ---

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the raw HTML for a URL.
    async fn fetch(&self, url: &str) -> Result<String>;
    fn name(&self) -> &str;
}

// --- Plain HTTP fetcher ---

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("docmill-crawl/0.1")
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let parsed = url::Url::parse(url).context("Invalid URL")?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            anyhow::bail!("Only http/https URLs are allowed, got: {}", parsed.scheme());
        }

        let resp = self.client.get(parsed).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            anyhow::bail!("Upstream returned status {status}: {snippet}");
        }

        Ok(resp.text().await?)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_non_http_schemes() {
        let fetcher = HttpFetcher::new();
        let err = fetcher.fetch("ftp://example.com/page").await.unwrap_err();
        assert!(err.to_string().contains("Only http/https"));
    }

    #[tokio::test]
    async fn rejects_unparseable_urls() {
        let fetcher = HttpFetcher::new();
        assert!(fetcher.fetch("not a url").await.is_err());
    }
}
