use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::fetcher::PageFetcher;
use crate::markdown::page_markdown;

pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
    /// Markdown of the most recent successful crawl. Last-writer-wins.
    pub last_markdown: Mutex<Option<String>>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            last_markdown: Mutex::new(None),
        }
    }
}

// --- Wire types ---

#[derive(Deserialize)]
pub struct CrawlRequest {
    #[serde(rename = "urlToScrape")]
    pub url_to_scrape: String,
}

#[derive(Serialize)]
pub struct CrawlResponse {
    pub message: String,
    pub markdown: String,
}

#[derive(Serialize)]
pub struct MarkdownResponse {
    pub markdown: String,
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(&'static str),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail.to_string()),
            ApiError::Internal(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail),
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

// --- Handlers ---

pub async fn crawl_url(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CrawlRequest>,
) -> Result<Json<CrawlResponse>, ApiError> {
    let url = req.url_to_scrape.trim();

    let html = state.fetcher.fetch(url).await.map_err(|e| {
        error!(url, fetcher = state.fetcher.name(), error = %e, "Crawl failed");
        ApiError::Internal(e.to_string())
    })?;

    let base = url::Url::parse(url).ok();
    let markdown = page_markdown(&html, base.as_ref());
    info!(url, chars = markdown.len(), "Crawl completed");

    *state.last_markdown.lock().await = Some(markdown.clone());

    Ok(Json(CrawlResponse {
        message: "Crawling completed successfully".to_string(),
        markdown,
    }))
}

pub async fn last_markdown(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MarkdownResponse>, ApiError> {
    match state.last_markdown.lock().await.clone() {
        Some(markdown) => Ok(Json(MarkdownResponse { markdown })),
        None => Err(ApiError::NotFound("No markdown generated yet")),
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/crawl/", post(crawl_url))
        .route("/last-markdown/", get(last_markdown))
        // Health check
        .route("/", get(|| async { "ok" }))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
