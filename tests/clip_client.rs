use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{DynamicImage, RgbImage};
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use layout_aesthetics::error::AppError;
use layout_aesthetics::model::{AestheticModel, Device, DEFAULT_MODEL_ID};
use layout_aesthetics::scoring::{score_with_clip, AESTHETIC_PROMPTS, FALLBACK_AESTHETIC_SCORE};
use layout_aesthetics::ClipClient;

/// Canned `/compare` reply plus every request body it received.
#[derive(Clone)]
struct Backend {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<Value>>>,
}

async fn compare(State(backend): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    backend.seen.lock().unwrap().push(body);
    (backend.status, Json(backend.reply.clone()))
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });
    format!("http://{}", addr)
}

async fn backend(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = Backend { status, reply, seen: seen.clone() };
    let app = Router::new()
        .route("/compare", post(compare))
        .route("/health", get(|| async { "ok" }))
        .with_state(state);
    (serve(app).await, seen)
}

fn client(url: String, device: Device) -> ClipClient {
    ClipClient::new(url, DEFAULT_MODEL_ID.to_string(), device)
}

fn screenshot() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 4, image::Rgb([10, 20, 30])))
}

fn model_message(err: AppError) -> String {
    match err {
        AppError::Model(message) => message,
        other => panic!("expected a model error, got {:?}", other),
    }
}

#[tokio::test]
async fn compare_returns_first_row_and_sends_model_and_device() {
    let (url, seen) = backend(StatusCode::OK, json!({"logits_per_image": [[1.0, 2.0, 3.0, 4.0, 5.0]]})).await;
    let clip = client(format!("{}/", url), Device::Gpu);

    let logits = clip.compare(&screenshot(), &AESTHETIC_PROMPTS).await.unwrap();
    assert_eq!(logits, vec![1.0, 2.0, 3.0, 4.0, 5.0]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let body = &seen[0];
    assert_eq!(body["model"], "CLIP-ViT-B/32");
    assert_eq!(body["device"], "gpu");
    assert_eq!(body["texts"].as_array().unwrap().len(), 5);
    assert_eq!(body["texts"][0], AESTHETIC_PROMPTS[0]);

    let png = BASE64.decode(body["image"].as_str().unwrap()).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (6, 4));
}

#[tokio::test]
async fn row_length_must_match_prompt_count() {
    let (url, _) = backend(StatusCode::OK, json!({"logits_per_image": [[1.0]]})).await;
    let err = client(url, Device::Cpu)
        .compare(&screenshot(), &["a tidy layout", "a messy layout"])
        .await
        .unwrap_err();
    assert_eq!(model_message(err), "expected 2 logits, got 1");
}

#[tokio::test]
async fn empty_logits_are_an_error() {
    let (url, _) = backend(StatusCode::OK, json!({"logits_per_image": []})).await;
    let err = client(url, Device::Cpu).compare(&screenshot(), &AESTHETIC_PROMPTS).await.unwrap_err();
    assert_eq!(model_message(err), "empty logits_per_image");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (url, _) = backend(StatusCode::BAD_GATEWAY, json!("down")).await;
    let err = client(url, Device::Cpu).compare(&screenshot(), &AESTHETIC_PROMPTS).await.unwrap_err();
    let message = model_message(err);
    assert!(message.starts_with("compare failed. Status: 502 Bad Gateway"), "{}", message);
    assert!(message.contains("down"), "{}", message);
}

#[tokio::test]
async fn backend_errors_degrade_to_fallback_score() {
    let (url, _) = backend(StatusCode::INTERNAL_SERVER_ERROR, json!({"detail": "cuda oom"})).await;
    let outcome = score_with_clip(&client(url, Device::Gpu), &screenshot()).await;
    assert!(outcome.is_fallback());
    assert_eq!(outcome.score(), FALLBACK_AESTHETIC_SCORE);
}

#[tokio::test]
async fn check_backend_reports_reachability() {
    let (url, _) = backend(StatusCode::OK, json!({})).await;
    assert!(client(url, Device::Cpu).check_backend().await.is_ok());

    // Bind then drop so nothing is listening on the port.
    let closed = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let err = client(closed, Device::Cpu).check_backend().await.unwrap_err();
    assert!(matches!(err, AppError::HttpClient(_)));
}

#[tokio::test]
async fn check_backend_rejects_error_status() {
    let app = Router::new().route("/health", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let url = serve(app).await;
    let err = client(url, Device::Cpu).check_backend().await.unwrap_err();
    assert!(model_message(err).contains("503"));
}
