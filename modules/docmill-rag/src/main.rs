use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use docmill_common::Config;
use docmill_rag::openai::OpenAiClient;
use docmill_rag::pinecone::PineconeClient;
use docmill_rag::preprocess::PreprocessClient;
use docmill_rag::routes::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("docmill=info".parse()?))
        .init();

    let config = Config::rag_from_env();

    let openai_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;
    let pinecone_key = std::env::var("PINECONE_API_KEY").context("PINECONE_API_KEY is not set")?;
    let pinecone_host =
        std::env::var("PINECONE_INDEX_HOST").context("PINECONE_INDEX_HOST is not set")?;
    let preprocess_url = std::env::var("DOCMILL_PREPROCESS_URL")
        .unwrap_or_else(|_| "http://localhost:8002".to_string());

    let openai = Arc::new(OpenAiClient::new(openai_key));
    let state = Arc::new(AppState::new(
        Arc::new(PreprocessClient::new(preprocess_url)),
        openai.clone(),
        Arc::new(PineconeClient::new(pinecone_host, pinecone_key)),
        openai,
    ));
    let app = router(state);

    let addr = config.bind_addr();
    info!("Docmill retrieval service starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
