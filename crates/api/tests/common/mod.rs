#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use posty_ai::openai::{ModelConfig, OpenAiConfig};
use posty_ai::{AiError, CompletionRequest, GeneratedImage, ImageGenerator, TextGenerator, TextTask};
use posty_api::auth::jwt::{generate_access_token, JwtConfig};
use posty_api::config::ServerConfig;
use posty_api::router::build_app_router;
use posty_api::state::AppState;
use posty_storage::{LocalObjectStore, StorageConfig};

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

// ---------------------------------------------------------------------------
// Fake generators
// ---------------------------------------------------------------------------

/// In-process text backend with canned replies per task.
pub struct FakeText {
    pub ideas_reply: Mutex<String>,
    pub draft_reply: Mutex<String>,
    pub rewrite_reply: Mutex<String>,
    pub fail: AtomicBool,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl Default for FakeText {
    fn default() -> Self {
        Self {
            ideas_reply: Mutex::new(
                r#"{"ideas": ["1. Onboarding mistakes", "2. Pricing myths", "3. Hiring your first engineer", "4. Shipping weekly", "5. Saying no to features"]}"#
                    .to_string(),
            ),
            draft_reply: Mutex::new("  Generated draft body.  ".to_string()),
            rewrite_reply: Mutex::new(" Rewritten text. ".to_string()),
            fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl FakeText {
    pub fn set_ideas(&self, reply: &str) {
        *self.ideas_reply.lock().unwrap() = reply.to_string();
    }

    pub fn set_rewrite(&self, reply: &str) {
        *self.rewrite_reply.lock().unwrap() = reply.to_string();
    }

    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> CompletionRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("at least one completion request")
    }
}

#[async_trait]
impl TextGenerator for FakeText {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(AiError::Api {
                status: 500,
                body: "fake upstream failure".to_string(),
            });
        }
        let reply = match request.task {
            TextTask::Ideas => &self.ideas_reply,
            TextTask::Draft => &self.draft_reply,
            TextTask::Rewrite => &self.rewrite_reply,
        };
        Ok(reply.lock().unwrap().clone())
    }
}

/// In-process image backend.
pub struct FakeImage {
    pub reply: Mutex<Option<GeneratedImage>>,
    pub prompts: Mutex<Vec<String>>,
}

impl Default for FakeImage {
    fn default() -> Self {
        Self {
            reply: Mutex::new(Some(GeneratedImage::Bytes {
                data: vec![0x89, b'P', b'N', b'G'],
                content_type: "image/png".to_string(),
            })),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl FakeImage {
    pub fn set_reply(&self, reply: Option<GeneratedImage>) {
        *self.reply.lock().unwrap() = reply;
    }
}

#[async_trait]
impl ImageGenerator for FakeImage {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AiError::Parse("no image".to_string()))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Router plus handles on its fakes. The media directory lives as long as this value.
pub struct TestApp {
    router: Router,
    pub text: Arc<FakeText>,
    pub image: Arc<FakeImage>,
    pub media: TempDir,
}

impl TestApp {
    /// A fresh handle to the router for one `oneshot` request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        audience: "authenticated".to_string(),
    }
}

/// Build a test `ServerConfig` with safe defaults and local storage under `media_root`.
pub fn test_config(media_root: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: jwt_config(),
        ai: OpenAiConfig {
            api_key: "unused".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            models: ModelConfig {
                ideas: "ideas".to_string(),
                draft: "draft".to_string(),
                rewrite: "rewrite".to_string(),
                image: "image".to_string(),
            },
        },
        storage: StorageConfig::Local {
            root: media_root.to_path_buf(),
            public_url: "http://localhost:3000/media".to_string(),
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// with fake generators and a tempdir-backed object store.
pub async fn build_test_app(pool: PgPool) -> TestApp {
    let media = tempfile::tempdir().expect("tempdir");
    let config = test_config(media.path());
    let text = Arc::new(FakeText::default());
    let image = Arc::new(FakeImage::default());
    let store = LocalObjectStore::new(
        media.path().to_path_buf(),
        "http://localhost:3000/media".to_string(),
    )
    .await
    .expect("local store");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        text_generator: text.clone(),
        image_generator: image.clone(),
        object_store: Arc::new(store),
    };

    TestApp {
        router: build_app_router(state, &config),
        text,
        image,
        media,
    }
}

/// A valid bearer token for `user_id`.
pub fn token_for(user_id: Uuid) -> String {
    generate_access_token(user_id, 900, &jwt_config()).expect("token")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a project through the API and return its id.
pub async fn create_project(test: &TestApp, token: &str, body: serde_json::Value) -> String {
    let response = post_json_auth(test.app(), "/api/v1/projects", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create an idea through the API and return its id.
pub async fn create_idea(test: &TestApp, token: &str, project_id: &str, text: &str) -> String {
    let response = post_json_auth(
        test.app(),
        &format!("/api/v1/projects/{project_id}/ideas"),
        serde_json::json!({ "idea_text": text }),
        token,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}
