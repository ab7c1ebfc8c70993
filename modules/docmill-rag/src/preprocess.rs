use std::path::Path;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::traits::TextExtractor;

/// Extracts document text by posting the file to the preprocess service.
pub struct PreprocessClient {
    http: reqwest::Client,
    base_url: String,
}

impl PreprocessClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ExtractResponse {
    texts: Vec<TextItem>,
}

#[derive(Deserialize)]
struct TextItem {
    text: String,
}

#[async_trait]
impl TextExtractor for PreprocessClient {
    async fn extract(&self, path: &Path) -> Result<String> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("document path has no filename: {}", path.display()))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;

        debug!(file = %filename, bytes = bytes.len(), "Sending document to preprocess service");
        let form = reqwest::multipart::Form::new()
            .part("file", reqwest::multipart::Part::bytes(bytes).file_name(filename));

        let response = self
            .http
            .post(format!("{}/preprocess/", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Preprocess service error ({status}): {text}"));
        }

        let extracted: ExtractResponse = response.json().await?;
        Ok(extracted
            .texts
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }
}
