use std::path::Path;

use anyhow::{anyhow, Result};
use tracing::info;

use crate::chunk::{chunk_text, Chunking};
use crate::traits::{Answerer, Embedder, TextExtractor, VectorIndex, VectorRecord};

/// Chunks embedded per request to the embedding API.
pub const EMBED_BATCH_SIZE: usize = 16;

/// Retrieved chunks fed into each answer.
pub const TOP_K: usize = 3;

/// Prompt rendered for the answering model. `{query}` and `{contexts}` are
/// substituted at request time.
pub const ANSWER_PROMPT: &str = "Answer the question \"{query}\" using only the context below. \
If the context does not contain the answer, say so.\n\nContext:\n{contexts}";

/// Index a staged document: extract its text, chunk it, embed each batch,
/// and upsert the vectors. Returns the number of chunks indexed.
///
/// Vector ids are `<stem>_chunk_<n>` with `n` counting across the whole
/// document, so re-uploading a file overwrites its previous vectors instead
/// of accumulating duplicates.
pub async fn index_document(
    extractor: &dyn TextExtractor,
    embedder: &dyn Embedder,
    index: &dyn VectorIndex,
    path: &Path,
    chunking: Chunking,
) -> Result<usize> {
    let file_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("document path has no usable name: {}", path.display()))?
        .to_string();

    let text = extractor.extract(path).await?;
    let chunks = chunk_text(&text, chunking.size, chunking.overlap);
    info!(file_id, chunks = chunks.len(), "Chunked document");

    for (batch_index, batch) in chunks.chunks(EMBED_BATCH_SIZE).enumerate() {
        let embeddings = embedder.embed(batch).await?;
        if embeddings.len() != batch.len() {
            return Err(anyhow!(
                "embedding count mismatch: {} inputs, {} vectors",
                batch.len(),
                embeddings.len()
            ));
        }

        let offset = batch_index * EMBED_BATCH_SIZE;
        let records: Vec<VectorRecord> = batch
            .iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (chunk, values))| VectorRecord {
                id: format!("{file_id}_chunk_{}", offset + i),
                values,
                text: chunk.clone(),
                source: file_id.clone(),
            })
            .collect();
        index.upsert(&records).await?;
    }

    Ok(chunks.len())
}

/// Answer a query from the index: embed the query, retrieve the closest
/// chunks, and complete a prompt over them.
pub async fn answer_query(
    embedder: &dyn Embedder,
    index: &dyn VectorIndex,
    answerer: &dyn Answerer,
    query: &str,
    top_k: usize,
) -> Result<String> {
    let query_input = [query.to_string()];
    let mut vectors = embedder.embed(&query_input).await?;
    let vector = vectors
        .pop()
        .ok_or_else(|| anyhow!("no embedding returned for query"))?;

    let contexts = index.query(&vector, top_k).await?.join("\n---\n");
    let prompt = ANSWER_PROMPT
        .replace("{query}", query)
        .replace("{contexts}", &contexts);

    answerer.complete(&prompt).await
}
