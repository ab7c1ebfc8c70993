use std::path::Path;

use axum::{
    extract::Multipart,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tracing::{error, info};

use docmill_common::DocmillError;

use crate::convert::convert_file;
use crate::element::{flatten_texts, TextRecord};

#[derive(Debug, Serialize)]
pub struct PreprocessResponse {
    pub document_name: Option<String>,
    pub origin: Option<String>,
    pub texts: Vec<TextRecord>,
}

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Conversion(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Validation(error) => (StatusCode::BAD_REQUEST, error),
            ApiError::Conversion(error) => (StatusCode::INTERNAL_SERVER_ERROR, error),
        };
        (status, Json(serde_json::json!({ "error": error }))).into_response()
    }
}

impl From<DocmillError> for ApiError {
    fn from(err: DocmillError) -> Self {
        match err {
            DocmillError::Validation(e) => ApiError::Validation(e),
            other => ApiError::Conversion(other.to_string()),
        }
    }
}

/// Stage uploaded bytes under a scratch directory, convert, and flatten.
///
/// The `TempDir` guard removes the scratch file on every exit path, so a
/// conversion failure never leaves the staged upload behind.
pub fn preprocess_file(filename: &str, bytes: &[u8]) -> Result<PreprocessResponse, ApiError> {
    // Validate before touching the filesystem; a rejected upload must never
    // reach a converter.
    let safe_name = Path::new(filename)
        .file_name()
        .ok_or_else(|| ApiError::Validation(format!("Invalid filename: {filename}")))?;
    let safe_name = safe_name.to_string_lossy().into_owned();
    if crate::convert::DocFormat::from_filename(&safe_name).is_none() {
        return Err(ApiError::Validation(format!(
            "File format not allowed: {safe_name}"
        )));
    }

    let scratch = tempfile::tempdir().map_err(|e| ApiError::Conversion(e.to_string()))?;
    let staged = scratch.path().join(&safe_name);
    std::fs::write(&staged, bytes).map_err(|e| ApiError::Conversion(e.to_string()))?;

    let converted = convert_file(&staged, &safe_name)?;
    let texts = flatten_texts(&converted.elements);

    Ok(PreprocessResponse {
        document_name: converted.meta.document_name,
        origin: converted.meta.origin,
        texts,
    })
}

// --- Handlers ---

pub async fn preprocess_document(
    mut multipart: Multipart,
) -> Result<Json<PreprocessResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?
    {
        if let Some(name) = field.file_name().map(str::to_string) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(e.to_string()))?;
            upload = Some((name, bytes.to_vec()));
            break;
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| ApiError::Validation("No file uploaded".to_string()))?;

    // Converters are synchronous (filesystem + parsing); keep them off the
    // async workers.
    let result = tokio::task::spawn_blocking(move || {
        let result = preprocess_file(&filename, &bytes);
        (filename, result)
    })
    .await
    .map_err(|e| ApiError::Conversion(e.to_string()))?;

    let (filename, result) = result;
    match result {
        Ok(response) => {
            info!(file = %filename, records = response.texts.len(), "Preprocessed document");
            Ok(Json(response))
        }
        Err(e) => {
            error!(file = %filename, error = ?e, "Preprocessing failed");
            Err(e)
        }
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/preprocess/", post(preprocess_document))
        // Health check
        .route("/", get(|| async { "ok" }))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_upload_round_trips_as_single_record() {
        let response = preprocess_file("notes.txt", b"hello from docmill").unwrap();
        assert_eq!(response.document_name.as_deref(), Some("notes"));
        assert_eq!(response.origin.as_deref(), Some("notes.txt"));
        assert_eq!(response.texts.len(), 1);
        assert_eq!(response.texts[0].label, "text");
        assert_eq!(response.texts[0].text, "hello from docmill");
    }

    #[test]
    fn html_upload_is_converted_and_flattened() {
        let html = b"<html><body><h1>Title</h1><p>Body text.</p></body></html>";
        let response = preprocess_file("page.html", html).unwrap();
        let labels: Vec<&str> = response.texts.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["h1", "p"]);
    }

    #[test]
    fn disallowed_extension_is_rejected_before_conversion() {
        match preprocess_file("report.exe", b"MZ") {
            Err(ApiError::Validation(msg)) => {
                assert_eq!(msg, "File format not allowed: report.exe");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_pdf_is_a_conversion_error() {
        match preprocess_file("broken.pdf", b"not really a pdf") {
            Err(ApiError::Conversion(_)) => {}
            other => panic!("expected conversion error, got {other:?}"),
        }
    }

    #[test]
    fn path_components_in_filenames_are_stripped() {
        let response = preprocess_file("uploads/notes.txt", b"x").unwrap();
        assert_eq!(response.origin.as_deref(), Some("notes.txt"));
    }
}
