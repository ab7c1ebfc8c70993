use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use docmill_crawl::fetcher::PageFetcher;
use docmill_crawl::routes::{router, AppState};

struct FixedPage(&'static str);

#[async_trait]
impl PageFetcher for FixedPage {
    async fn fetch(&self, _url: &str) -> Result<String> {
        Ok(self.0.to_string())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

const PAGE: &str = "<html><head><title>Guide</title></head><body><article>\
    <h1>Field Guide</h1>\
    <p>Herons wade slowly through shallow water while hunting. This paragraph \
    carries enough prose for main-content extraction to keep it in the \
    converted output of the page.</p>\
    </article></body></html>";

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn crawl_then_read_back_over_http() {
    let state = Arc::new(AppState::new(Arc::new(FixedPage(PAGE))));
    let app = router(state);

    let response = app
        .clone()
        .oneshot(
            Request::post("/crawl/")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"urlToScrape": "https://example.com/"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Crawling completed successfully");
    assert!(body["markdown"].as_str().unwrap().contains("Herons wade"));

    let response = app
        .oneshot(Request::get("/last-markdown/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["markdown"].as_str().unwrap().contains("Herons wade"));
}

#[tokio::test]
async fn last_markdown_is_404_on_a_fresh_service() {
    let state = Arc::new(AppState::new(Arc::new(FixedPage(PAGE))));
    let app = router(state);

    let response = app
        .oneshot(Request::get("/last-markdown/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["detail"], "No markdown generated yet");
}
