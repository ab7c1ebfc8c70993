use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::traits::{VectorIndex, VectorRecord};

/// Client for a Pinecone index's data-plane HTTP API.
pub struct PineconeClient {
    api_key: String,
    http: reqwest::Client,
    host: String,
}

impl PineconeClient {
    /// `host` is the index endpoint, e.g. `https://docs-abc123.svc.pinecone.io`.
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: reqwest::Client::new(),
            host: host.into().trim_end_matches('/').to_string(),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("Api-Key", HeaderValue::from_str(&self.api_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        let response = self
            .http
            .post(format!("{}{path}", self.host))
            .headers(self.headers()?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Pinecone API error ({status}): {text}"));
        }
        Ok(response.json().await?)
    }
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<WireVector<'a>>,
}

#[derive(Serialize)]
struct WireVector<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: WireMetadata<'a>,
}

#[derive(Serialize)]
struct WireMetadata<'a> {
    text: &'a str,
    source: &'a str,
}

#[derive(Deserialize)]
struct UpsertResponse {
    #[serde(rename = "upsertedCount", default)]
    upserted_count: u64,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    vector: &'a [f32],
    #[serde(rename = "topK")]
    top_k: usize,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    metadata: Option<MatchMetadata>,
}

#[derive(Deserialize)]
struct MatchMetadata {
    text: Option<String>,
}

#[async_trait]
impl VectorIndex for PineconeClient {
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()> {
        let request = UpsertRequest {
            vectors: records
                .iter()
                .map(|r| WireVector {
                    id: &r.id,
                    values: &r.values,
                    metadata: WireMetadata {
                        text: &r.text,
                        source: &r.source,
                    },
                })
                .collect(),
        };
        let response: UpsertResponse = self.post_json("/vectors/upsert", &request).await?;
        debug!(upserted = response.upserted_count, "Upserted vectors");
        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<String>> {
        let response: QueryResponse = self
            .post_json(
                "/query",
                &QueryRequest {
                    vector,
                    top_k,
                    include_metadata: true,
                },
            )
            .await?;

        Ok(response
            .matches
            .into_iter()
            .filter_map(|m| m.metadata.and_then(|meta| meta.text))
            .collect())
    }
}
