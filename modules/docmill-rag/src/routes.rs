use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::chunk::Chunking;
use crate::pipeline::{self, TOP_K};
use crate::traits::{Answerer, Embedder, TextExtractor, VectorIndex};

pub struct AppState {
    pub extractor: Arc<dyn TextExtractor>,
    pub embedder: Arc<dyn Embedder>,
    pub index: Arc<dyn VectorIndex>,
    pub answerer: Arc<dyn Answerer>,
    pub chunking: Chunking,
    pub top_k: usize,
}

impl AppState {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        answerer: Arc<dyn Answerer>,
    ) -> Self {
        Self {
            extractor,
            embedder,
            index,
            answerer,
            chunking: Chunking::default(),
            top_k: TOP_K,
        }
    }
}

// --- Wire types ---

#[derive(Deserialize)]
pub struct RagRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct RagResponse {
    pub answer: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub chunks: usize,
}

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Validation(error) => (StatusCode::BAD_REQUEST, error),
            ApiError::Internal(error) => (StatusCode::INTERNAL_SERVER_ERROR, error),
        };
        (status, Json(serde_json::json!({ "error": error }))).into_response()
    }
}

// --- Handlers ---

/// Accept document uploads and index each one. All file parts in the
/// request are processed; the response reports the total chunk count.
pub async fn upload_documents(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut total_chunks = 0;
    let mut files = 0;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        // Strip any client-supplied path components before staging.
        let safe_name = Path::new(&filename)
            .file_name()
            .ok_or_else(|| ApiError::Validation(format!("Invalid filename: {filename}")))?
            .to_string_lossy()
            .into_owned();

        let scratch = tempfile::tempdir().map_err(|e| ApiError::Internal(e.to_string()))?;
        let staged = scratch.path().join(&safe_name);
        tokio::fs::write(&staged, &bytes)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        let chunks = pipeline::index_document(
            state.extractor.as_ref(),
            state.embedder.as_ref(),
            state.index.as_ref(),
            &staged,
            state.chunking,
        )
        .await
        .map_err(|e| {
            error!(file = %safe_name, error = %e, "Indexing failed");
            ApiError::Internal(e.to_string())
        })?;

        info!(file = %safe_name, chunks, "Indexed uploaded document");
        total_chunks += chunks;
        files += 1;
    }

    if files == 0 {
        return Err(ApiError::Validation("No files uploaded".to_string()));
    }

    Ok(Json(UploadResponse {
        message: "Files uploaded and indexed successfully".to_string(),
        chunks: total_chunks,
    }))
}

pub async fn rag_query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RagRequest>,
) -> Result<Json<RagResponse>, ApiError> {
    let query = req.query.trim();
    if query.is_empty() {
        return Err(ApiError::Validation("Query is required".to_string()));
    }

    let answer = pipeline::answer_query(
        state.embedder.as_ref(),
        state.index.as_ref(),
        state.answerer.as_ref(),
        query,
        state.top_k,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "Query answering failed");
        ApiError::Internal(e.to_string())
    })?;

    info!(chars = answer.len(), "Answered query");
    Ok(Json(RagResponse { answer }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/upload", post(upload_documents))
        .route("/api/rag", post(rag_query))
        // Health check
        .route("/", get(|| async { "ok" }))
        .with_state(state)
        // Documents can be large; the 2MB default is too small for PDFs.
        .layer(axum::extract::DefaultBodyLimit::max(50 * 1024 * 1024))
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
