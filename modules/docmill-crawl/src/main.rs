use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use docmill_common::Config;
use docmill_crawl::fetcher::HttpFetcher;
use docmill_crawl::routes::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("docmill=info".parse()?))
        .init();

    let config = Config::crawl_from_env();

    let state = Arc::new(AppState::new(Arc::new(HttpFetcher::new())));
    let app = router(state);

    let addr = config.bind_addr();
    info!("Docmill crawl service starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
