//! HTTP surface tests, driven through the router without a socket

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tokio::time::Duration;

use voicelegal_server::analysis::{fallback_report, word_count, AnalysisService};
use voicelegal_server::config::Config;
use voicelegal_server::extract::{ExtractError, MupdfExtractor, TextExtractor};
use voicelegal_server::routes;
use voicelegal_server::state::AppState;

use common::*;

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send_json(&app, empty_request(Method::GET, "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "voicelegal-backend");
    assert!(body["timestamp"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_extractor_reads_every_page() {
    let lines = clause_lines(100);
    let pdf = build_pdf(&lines);

    let text = MupdfExtractor::new().extract(Bytes::from(pdf)).await.unwrap();

    assert_eq!(word_count(&text), 1000);
    assert!(text.contains("clause00000"));
    assert!(text.contains("clause00999"));
}

#[tokio::test]
async fn test_upload_document_without_credentials_uses_fallback() {
    let app = test_app();
    let pdf = build_pdf(&clause_lines(400));
    assert!(pdf.len() >= 50 * 1000);

    let extracted = MupdfExtractor::new()
        .extract(Bytes::from(pdf.clone()))
        .await
        .unwrap();
    let words = word_count(&extracted);
    assert_eq!(words, 4000);

    let (status, body) = send_json(
        &app,
        multipart_request("/api/upload-document", "lease.pdf", &pdf),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filename"], "lease.pdf");
    let analysis = body["analysis"].as_str().unwrap();
    assert_eq!(analysis, fallback_report("lease.pdf", &extracted));
    assert!(analysis.contains(&format!("approximately {} words", words)));

    let preview = body["document_preview"].as_str().unwrap();
    assert!(preview.ends_with("..."));
    assert_eq!(preview.chars().count(), 503);

    // The record is retrievable by id, any number of times
    let doc_id = body["doc_id"].as_str().unwrap().to_string();
    for _ in 0..2 {
        let (status, record) = send_json(
            &app,
            empty_request(Method::GET, &format!("/api/document/{}", doc_id)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record["doc_id"], doc_id.as_str());
        assert_eq!(record["full_analysis"], analysis);
        assert_eq!(record["document_text"].as_str().unwrap().chars().count(), 5000);
        assert!(record["uploaded_at"].as_str().is_some());
    }
}

#[tokio::test]
async fn test_analyze_returns_fallback_report() {
    let app = test_app();
    let pdf = build_pdf(&clause_lines(3));

    let (status, body) = send_json(&app, multipart_request("/api/analyze", "terms.pdf", &pdf)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["filename"], "terms.pdf");
    assert!(body["analysis"]
        .as_str()
        .unwrap()
        .contains("approximately 30 words"));
}

#[tokio::test]
async fn test_analyze_rejects_non_pdf_filename() {
    let app = test_app();
    let (status, body) = send_json(
        &app,
        multipart_request("/api/analyze", "notes.txt", b"plain text"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Only PDF files are allowed");
}

#[tokio::test]
async fn test_analyze_rejects_uppercase_pdf_extension() {
    let app = test_app();
    let pdf = build_pdf(&clause_lines(3));

    let (status, body) = send_json(&app, multipart_request("/api/analyze", "terms.PDF", &pdf)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Only PDF files are allowed");
}

/// Extractor that always reports the extraction budget as exceeded
struct TimedOutExtractor;

#[async_trait]
impl TextExtractor for TimedOutExtractor {
    async fn extract(&self, _data: Bytes) -> Result<String, ExtractError> {
        Err(ExtractError::Timeout(30))
    }
}

#[tokio::test]
async fn test_extraction_timeout_is_server_error() {
    let state = AppState::with_components(
        Config::default(),
        Arc::new(TimedOutExtractor),
        AnalysisService::fallback_only(),
    );
    let app = routes::app(state);
    let pdf = build_pdf(&clause_lines(3));

    let (status, body) = send_json(&app, multipart_request("/api/analyze", "slow.pdf", &pdf)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "extraction_error");
    assert!(body["detail"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_analyze_rejects_oversized_upload() {
    let mut config = Config::default();
    config.upload.max_bytes = 1024 * 1024;
    let app = routes::app(test_state(config));

    let data = vec![b'x'; 1024 * 1024 + 512 * 1024];
    let (status, body) = send_json(&app, multipart_request("/api/analyze", "big.pdf", &data)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "File too large (max 1MB)");
}

#[tokio::test]
async fn test_blank_pdf_is_bad_request() {
    let app = test_app();
    let pdf = build_pdf(&[]);

    let (status, body) = send_json(&app, multipart_request("/api/analyze", "blank.pdf", &pdf)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Could not extract text from PDF");
}

#[tokio::test]
async fn test_unknown_document_is_not_found() {
    let app = test_app();
    let (status, body) =
        send_json(&app, empty_request(Method::GET, "/api/document/does-not-exist")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Document not found");
}

#[tokio::test]
async fn test_analyze_text() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        json_request(
            Method::POST,
            "/api/analyze-text",
            json!({ "text": "You waive all rights.", "url": "https://example.com/tos", "title": "Example ToS" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["url"], "https://example.com/tos");
    assert_eq!(body["title"], "Example ToS");
    assert_eq!(
        body["analysis"],
        fallback_report("Example ToS", "You waive all rights.")
    );
}

#[tokio::test]
async fn test_analyze_text_requires_text() {
    let app = test_app();

    for payload in [json!({ "text": "" }), json!({ "url": "https://example.com" })] {
        let (status, body) =
            send_json(&app, json_request(Method::POST, "/api/analyze-text", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "No text provided");
    }
}

#[tokio::test]
async fn test_malformed_json_gets_error_body() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        json_request(Method::POST, "/api/analyze-text", json!({ "text": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["detail"].as_str().is_some_and(|detail| !detail.is_empty()));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/store-temp-analysis")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("not json"))
        .unwrap();
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/webhook/get-document-analysis")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{"))
        .unwrap();
    let (status, body) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_temp_analysis_is_one_shot() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        json_request(Method::POST, "/api/store-temp-analysis", json!({ "foo": "bar" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let analysis_id = body["analysis_id"].as_str().unwrap().to_string();

    let uri = format!("/api/get-temp-analysis/{}", analysis_id);
    let (status, body) = send_json(&app, empty_request(Method::GET, &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": { "foo": "bar" } }));

    let (status, body) = send_json(&app, empty_request(Method::GET, &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Analysis not found or expired");
}

#[tokio::test(start_paused = true)]
async fn test_temp_analysis_expires() {
    let app = test_app();

    let (_, body) = send_json(
        &app,
        json_request(Method::POST, "/api/store-temp-analysis", json!({ "analysis": "report" })),
    )
    .await;
    let uri = format!("/api/get-temp-analysis/{}", body["analysis_id"].as_str().unwrap());

    tokio::time::advance(Duration::from_secs(300)).await;

    let (status, _) = send_json(&app, empty_request(Method::GET, &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_agent_before_any_upload() {
    let app = test_app();

    let (status, body) =
        send_json(&app, empty_request(Method::POST, "/api/agent/get-document-analysis")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "No document has been uploaded yet. Please ask the user to upload a document first."
        })
    );
}

#[tokio::test]
async fn test_agent_reads_latest_and_explicit_documents() {
    let app = test_app();

    let (_, first) = send_json(
        &app,
        multipart_request("/api/upload-document", "first.pdf", &build_pdf(&clause_lines(2))),
    )
    .await;
    let (_, second) = send_json(
        &app,
        multipart_request("/api/upload-document", "second.pdf", &build_pdf(&clause_lines(4))),
    )
    .await;

    let (status, latest) =
        send_json(&app, empty_request(Method::POST, "/api/agent/get-document-analysis")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest["success"], true);
    assert_eq!(latest["filename"], "second.pdf");
    assert_eq!(latest["analysis"], second["analysis"]);
    assert!(latest["uploaded_at"].as_str().is_some());

    let uri = format!(
        "/api/agent/get-document-analysis?doc_id={}",
        first["doc_id"].as_str().unwrap()
    );
    let (_, by_query) = send_json(&app, empty_request(Method::POST, &uri)).await;
    assert_eq!(by_query["filename"], "first.pdf");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/agent/get-document-analysis")
        .header("doc_id", first["doc_id"].as_str().unwrap())
        .body(Body::empty())
        .unwrap();
    let (_, by_header) = send_json(&app, request).await;
    assert_eq!(by_header["filename"], "first.pdf");

    let (_, latest_keyword) = send_json(
        &app,
        empty_request(Method::POST, "/api/agent/get-document-analysis?doc_id=latest"),
    )
    .await;
    assert_eq!(latest_keyword["filename"], "second.pdf");

    let (status, missing) = send_json(
        &app,
        empty_request(Method::POST, "/api/agent/get-document-analysis?doc_id=nope"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        missing,
        json!({ "success": false, "message": "Document nope not found." })
    );
}

#[tokio::test]
async fn test_document_context_webhook() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        json_request(
            Method::POST,
            "/api/store-document-context",
            json!({ "analysis": "# Report", "filename": "nda.pdf" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let conversation_id = body["conversation_id"].as_str().unwrap().to_string();

    // Webhook reads do not consume the context
    for _ in 0..2 {
        let (status, body) = send_json(
            &app,
            json_request(
                Method::POST,
                "/api/webhook/get-document-analysis",
                json!({ "conversation_id": conversation_id }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "success": true, "analysis": "# Report", "filename": "nda.pdf" })
        );
    }
}

#[tokio::test]
async fn test_webhook_unknown_conversation() {
    let app = test_app();

    for payload in [json!({ "conversation_id": "unknown" }), json!({})] {
        let (status, body) = send_json(
            &app,
            json_request(Method::POST, "/api/webhook/get-document-analysis", payload),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": false, "error": "Document not found" }));
    }
}

#[tokio::test]
async fn test_cors_allows_extension_origin() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/analyze-text")
        .header(header::ORIGIN, "chrome-extension://abcdef")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "chrome-extension://abcdef"
    );
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}
