//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use voicelegal_server::analysis::AnalysisService;
use voicelegal_server::config::Config;
use voicelegal_server::extract::MupdfExtractor;
use voicelegal_server::routes;
use voicelegal_server::state::AppState;

pub const BOUNDARY: &str = "voicelegal-test-boundary";

/// Lines per generated page, kept inside the media box
const LINES_PER_PAGE: usize = 45;
const WORDS_PER_LINE: usize = 10;

/// State with MuPDF extraction and no analysis credentials
pub fn test_state(config: Config) -> AppState {
    AppState::with_components(
        config,
        Arc::new(MupdfExtractor::new()),
        AnalysisService::fallback_only(),
    )
}

pub fn test_app() -> Router {
    routes::app(test_state(Config::default()))
}

/// Generated document text: `lines` lines of numbered clause words
pub fn clause_lines(lines: usize) -> Vec<String> {
    (0..lines)
        .map(|line| {
            (0..WORDS_PER_LINE)
                .map(|word| format!("clause{:05}", line * WORDS_PER_LINE + word))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Build a valid PDF (correct xref offsets) showing `lines` in Helvetica
pub fn build_pdf(lines: &[String]) -> Vec<u8> {
    let pages: Vec<&[String]> = lines.chunks(LINES_PER_PAGE).collect();
    let page_count = pages.len().max(1);

    let mut objects: Vec<Vec<u8>> = Vec::new();
    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();

    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    objects.push(
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), page_count).into_bytes(),
    );
    objects.push(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_vec());

    for i in 0..page_count {
        let page_lines = pages.get(i).copied().unwrap_or(&[]);
        let mut content = String::from("BT\n/F1 10 Tf\n14 TL\n50 750 Td\n");
        for line in page_lines {
            content.push_str(&format!("({}) Tj\nT*\n", line));
        }
        content.push_str("ET\n");

        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                5 + 2 * i
            )
            .into_bytes(),
        );
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content.as_bytes());
        stream.extend_from_slice(b"endstream");
        objects.push(stream);
    }

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
        pdf.extend_from_slice(body);
        pdf.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    pdf
}

/// Encode a single-file multipart/form-data body
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/pdf\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, filename: &str, data: &[u8]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body("file", filename, data)))
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send one request through the router
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// Send a request and decode the JSON response
pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = send(app, request).await;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
