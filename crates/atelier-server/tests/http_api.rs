//! Handler tests over an in-memory store and a mock upstream.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use atelier_core::time::DEFAULT_DISPLAY_TZ;
use atelier_history::{HistoryStore, NewImageRecord};
use atelier_openai::{ApiKey, ImagesClient, OpenAiConfig, SpeechClient, VisionClient};
use atelier_server::{AppState, GenerationClients, Surfaces, build_router};

fn tiny_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([9, 8, 7]));
    let mut buffer = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

struct Harness {
    app: Router,
    store: Arc<HistoryStore>,
    _dirs: tempfile::TempDir,
}

fn harness_with(upstream: Option<&MockServer>, surfaces: Surfaces) -> Harness {
    let store = Arc::new(HistoryStore::open_in_memory().unwrap());
    let dirs = tempfile::tempdir().unwrap();
    let clients = upstream.map(|server| {
        let config = OpenAiConfig::new(ApiKey::new("sk-test").unwrap()).with_base_url(server.uri());
        GenerationClients {
            images: ImagesClient::new(config.clone(), "dall-e-3"),
            speech: SpeechClient::new(config.clone()),
            vision: VisionClient::new(config, "gpt-4-vision-preview"),
        }
    });
    let state = AppState::new(
        store.clone(),
        clients,
        dirs.path().join("audio"),
        dirs.path().join("uploads"),
        DEFAULT_DISPLAY_TZ,
    );
    Harness {
        app: build_router(state, surfaces),
        store,
        _dirs: dirs,
    }
}

fn harness(upstream: &MockServer) -> Harness {
    harness_with(Some(upstream), Surfaces::default())
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn mount_image_generation(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "created": 1_700_000_000,
            "data": [{
                "url": format!("{}/files/gen.png", server.uri()),
                "revised_prompt": "a very detailed fox",
            }],
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/gen.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(tiny_png()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn health_reports_ok() {
    let server = MockServer::start().await;
    let harness = harness(&server);

    let response = harness.app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["generationEnabled"], true);
}

#[tokio::test]
async fn image_generation_end_to_end() {
    let server = MockServer::start().await;
    mount_image_generation(&server).await;
    let harness = harness(&server);

    let response = harness
        .app
        .clone()
        .oneshot(post_json(
            "/api/images/generations",
            serde_json::json!({"prompt": "a fox", "size": "1024x1792", "quality": "hd"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    let id = body["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("img_"));
    assert_eq!(body["revisedPrompt"], "a very detailed fox");
    assert_eq!(body["size"], "1024x1792");
    assert_eq!(body["quality"], "hd");
    assert!(body["mediaError"].is_null());

    let listing = harness
        .app
        .clone()
        .oneshot(get("/api/images/generations"))
        .await
        .unwrap();
    assert_eq!(listing.status(), StatusCode::OK);
    let items = json_body(listing).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["id"], id.as_str());

    let content = harness
        .app
        .oneshot(get(&format!("/api/images/generations/{id}/content")))
        .await
        .unwrap();
    assert_eq!(content.status(), StatusCode::OK);
    assert_eq!(
        content.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "image/png"
    );
    let bytes = axum::body::to_bytes(content.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(image::load_from_memory(&bytes).is_ok());
}

#[tokio::test]
async fn listing_is_newest_first() {
    let server = MockServer::start().await;
    let harness = harness(&server);
    let png = tiny_png();
    for prompt in ["first", "second", "third"] {
        harness
            .store
            .record_image(&NewImageRecord {
                prompt,
                revised_prompt: None,
                image: &png,
                source_url: None,
                size: "1024x1024",
                quality: "standard",
            })
            .unwrap();
    }

    let listing = harness
        .app
        .oneshot(get("/api/images/generations"))
        .await
        .unwrap();
    let items = json_body(listing).await;
    let prompts: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["prompt"].as_str().unwrap())
        .collect();
    assert_eq!(prompts, ["third", "second", "first"]);
}

#[tokio::test]
async fn empty_prompt_rejected_before_any_upstream_call() {
    // No mocks mounted: any outbound request would 404 loudly.
    let server = MockServer::start().await;
    let harness = harness(&server);

    let response = harness
        .app
        .clone()
        .oneshot(post_json(
            "/api/images/generations",
            serde_json::json!({"prompt": "   "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["code"], "validation");

    assert!(harness.store.list_images().unwrap().is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn upstream_failure_leaves_no_history_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .mount(&server)
        .await;
    let harness = harness(&server);

    let response = harness
        .app
        .oneshot(post_json(
            "/api/images/generations",
            serde_json::json!({"prompt": "a fox"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["code"], "upstream");

    assert!(harness.store.list_images().unwrap().is_empty());
}

#[tokio::test]
async fn stream_flag_is_not_implemented() {
    let server = MockServer::start().await;
    let harness = harness(&server);

    let response = harness
        .app
        .oneshot(post_json(
            "/api/speech/generations",
            serde_json::json!({"input": "hello", "stream": true}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    assert!(harness.store.list_speech().unwrap().is_empty());
}

#[tokio::test]
async fn missing_api_key_disables_generation_but_not_history() {
    let harness = harness_with(None, Surfaces::default());

    let response = harness
        .app
        .clone()
        .oneshot(post_json(
            "/api/images/generations",
            serde_json::json!({"prompt": "a fox"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["code"], "missingApiKey");

    let listing = harness
        .app
        .oneshot(get("/api/images/generations"))
        .await
        .unwrap();
    assert_eq!(listing.status(), StatusCode::OK);
}

#[tokio::test]
async fn speech_generation_writes_audio_and_serves_it() {
    let server = MockServer::start().await;
    let audio: &[u8] = b"ID3\x04mock-audio";
    Mock::given(method("POST"))
        .and(path("/v1/audio/speech"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(audio))
        .mount(&server)
        .await;
    let harness = harness(&server);

    let response = harness
        .app
        .clone()
        .oneshot(post_json(
            "/api/speech/generations",
            serde_json::json!({"input": "hello there", "voice": "nova", "model": "tts-1-hd"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    let id = body["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("spch_"));
    assert_eq!(body["voice"], "nova");
    assert_eq!(body["model"], "tts-1-hd");
    let file_name = body["fileName"].as_str().unwrap();
    assert!(file_name.starts_with("nova_"));
    assert!(file_name.ends_with(".mp3"));
    assert!(body["mediaError"].is_null());

    let content = harness
        .app
        .oneshot(get(&format!("/api/speech/generations/{id}/content")))
        .await
        .unwrap();
    assert_eq!(content.status(), StatusCode::OK);
    assert_eq!(
        content.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "audio/mpeg"
    );
    let bytes = axum::body::to_bytes(content.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], audio);
}

#[tokio::test]
async fn vision_query_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "A tiny square."}}],
        })))
        .mount(&server)
        .await;
    let harness = harness(&server);

    let response = harness
        .app
        .clone()
        .oneshot(post_json(
            "/api/vision/queries",
            serde_json::json!({
                "question": "What is in this image?",
                "imageBase64": BASE64.encode(tiny_png()),
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    let id = body["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("vis_"));
    assert_eq!(body["answer"], "A tiny square.");
    assert!(body["mediaError"].is_null());

    let content = harness
        .app
        .oneshot(get(&format!("/api/vision/queries/{id}/content")))
        .await
        .unwrap();
    assert_eq!(content.status(), StatusCode::OK);
    assert_eq!(
        content.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "image/jpeg"
    );
}

#[tokio::test]
async fn invalid_upload_base64_rejected() {
    let server = MockServer::start().await;
    let harness = harness(&server);

    let response = harness
        .app
        .oneshot(post_json(
            "/api/vision/queries",
            serde_json::json!({"question": "what?", "imageBase64": "!!not-base64!!"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(harness.store.list_vision().unwrap().is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_record_content_is_404() {
    let server = MockServer::start().await;
    let harness = harness(&server);

    let response = harness
        .app
        .oneshot(get("/api/images/generations/img_missing/content"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["code"], "notFound");
}

#[tokio::test]
async fn disabled_surface_routes_are_absent() {
    let server = MockServer::start().await;
    let harness = harness_with(
        Some(&server),
        Surfaces {
            images: true,
            speech: false,
            vision: false,
        },
    );

    let response = harness
        .app
        .clone()
        .oneshot(post_json(
            "/api/speech/generations",
            serde_json::json!({"input": "hello"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let listing = harness
        .app
        .oneshot(get("/api/images/generations"))
        .await
        .unwrap();
    assert_eq!(listing.status(), StatusCode::OK);
}
