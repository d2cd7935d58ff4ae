mod common;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use inkscan::error::InkscanError;
use inkscan::ocr::{OcrApiClient, OcrProvider, DEFAULT_CONFIDENCE};

use common::{body_contains, ocr_config, png_file, OCR_PATH};

fn client_for(server: &MockServer) -> OcrApiClient {
    OcrApiClient::new(&format!("{}{}", server.uri(), OCR_PATH), 5).unwrap()
}

#[tokio::test]
async fn file_mode_posts_image_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OCR_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "x1", "text": "Hello", "confidence": 0.9
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server).ocr_file(&png_file()).await.unwrap();
    assert_eq!(resp.text.as_deref(), Some("Hello"));
    assert_eq!(resp.confidence, Some(0.9));

    let requests = server.received_requests().await.unwrap();
    let body = &requests[0].body;
    assert!(body_contains(body, "name=\"image\""));
    assert!(body_contains(body, "Content-Type: image/png"));
}

#[tokio::test]
async fn url_mode_posts_json_to_url_suffix() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ocr/url"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "imageUrl": "https://host/img.png" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1", "text": "From URL", "confidence": 0.8
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .ocr_url("https://host/img.png")
        .await
        .unwrap();
    assert_eq!(resp.text.as_deref(), Some("From URL"));
}

#[tokio::test]
async fn non_success_status_uses_fixed_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.ocr_file(&png_file()).await.unwrap_err();
    assert!(matches!(err, InkscanError::Ocr(_)));
    assert_eq!(err.to_string(), "Failed to process image");

    let err = client.ocr_url("https://host/img.png").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to process image URL");
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OCR_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).ocr_file(&png_file()).await.unwrap_err();
    assert!(matches!(err, InkscanError::InvalidResponse(_)));
    assert_eq!(err.to_string(), "Invalid OCR response");
}

#[tokio::test]
async fn provider_normalizes_sparse_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(OCR_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "Only text" })))
        .mount(&server)
        .await;

    let provider = OcrProvider::new(&ocr_config(Some(&server))).unwrap();
    let out = provider.ocr_file(&png_file()).await.unwrap();

    assert_eq!(out.text, "Only text");
    assert_eq!(out.confidence, DEFAULT_CONFIDENCE);
    assert_eq!(out.id.len(), 9);
}

#[tokio::test]
async fn unconfigured_provider_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = OcrProvider::new(&ocr_config(None)).unwrap();
    let err = provider.ocr_file(&png_file()).await.unwrap_err();
    assert!(matches!(err, InkscanError::Config(_)));
    assert_eq!(err.to_string(), "OCR API URL not configured");
}
