use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use docmill_common::Config;
use docmill_preprocess::routes::router;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("docmill=info".parse()?))
        .init();

    let config = Config::preprocess_from_env();
    let app = router();

    let addr = config.bind_addr();
    info!("Docmill preprocess service starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
