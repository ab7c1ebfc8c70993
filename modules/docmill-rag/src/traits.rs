use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

/// One chunk ready for (or retrieved from) the vector index.
#[derive(Debug, Clone)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub text: String,
    pub source: String,
}

/// Turns a staged document into its full plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String>;
}

/// Embeds a batch of texts into vectors, one per input, in input order.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Stores chunk vectors and returns the texts closest to a query vector.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()>;
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<String>>;
}

/// Produces a completion for a fully rendered prompt.
#[async_trait]
pub trait Answerer: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
