//! Common test utilities for integration tests
//!
//! `TestApp` drives the real router over in-memory storage. The AI is
//! either switched off or replaced by [`ScriptedAi`], which answers from a
//! queue and records what it was asked.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::Fake;
use nutrifit_backend::ai::{AiAssistant, AiError, ChatCompletion, CompletionRequest};
use nutrifit_backend::config::AppConfig;
use nutrifit_backend::storage::MemStorage;
use nutrifit_backend::{routes, state::AppState};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// AI backend that replays queued replies; `None` simulates a failed call
#[derive(Default)]
pub struct ScriptedAi {
    replies: Mutex<VecDeque<Option<String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedAi {
    pub fn push(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(Some(reply.to_string()));
    }

    pub fn push_failure(&self) {
        self.replies.lock().unwrap().push_back(None);
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for ScriptedAi {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Some(reply)) => Ok(reply),
            Some(None) => Err(AiError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            }),
            None => Err(AiError::Transport("no scripted reply left".to_string())),
        }
    }
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub ai: Option<Arc<ScriptedAi>>,
}

impl TestApp {
    /// App with AI features switched off
    pub fn new() -> Self {
        Self::build(AiAssistant::disabled(), None)
    }

    /// App whose AI answers from a script
    pub fn with_ai() -> Self {
        let ai = Arc::new(ScriptedAi::default());
        Self::build(AiAssistant::new(ai.clone()), Some(ai))
    }

    fn build(assistant: AiAssistant, ai: Option<Arc<ScriptedAi>>) -> Self {
        let state = AppState::new(Arc::new(MemStorage::new()), assistant, test_config())
            .expect("Failed to build app state");
        Self {
            app: routes::create_router(state),
            ai,
        }
    }

    pub fn script(&self) -> &ScriptedAi {
        self.ai.as_deref().expect("app was built without scripted AI")
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    fn builder(method: &str, path: &str, token: Option<&str>) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
    }

    /// Make a GET request
    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, String) {
        let request = Self::builder("GET", path, token).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// GET returning raw bytes and the content type
    pub async fn get_bytes(&self, path: &str, token: &str) -> (StatusCode, String, Vec<u8>) {
        let request = Self::builder("GET", path, Some(token))
            .body(Body::empty())
            .unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, body.to_vec())
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &Value, token: Option<&str>) -> (StatusCode, String) {
        let request = Self::builder("POST", path, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn delete(&self, path: &str, token: &str) -> (StatusCode, String) {
        let request = Self::builder("DELETE", path, Some(token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Upload one file as multipart form data
    pub async fn upload(
        &self,
        path: &str,
        token: &str,
        field: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> (StatusCode, String) {
        const BOUNDARY: &str = "nutrifit-test-boundary";
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"meal.bin\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let request = Self::builder("POST", path, Some(token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Register a fresh user and return `(username, token)`
    pub async fn register_user(&self) -> (String, String) {
        let username = format!(
            "{}_{}",
            Username().fake::<String>().replace('.', "_"),
            &uuid::Uuid::new_v4().simple().to_string()[..8]
        );
        let email = format!(
            "{}.{}",
            &uuid::Uuid::new_v4().simple().to_string()[..8],
            SafeEmail().fake::<String>()
        );
        let (status, body) = self
            .post(
                "/api/register",
                &serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": "correct horse battery",
                    "fullName": "Test User"
                }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        let body: Value = serde_json::from_str(&body).unwrap();
        (username, body["token"].as_str().unwrap().to_string())
    }
}

pub fn json(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("invalid JSON ({}): {}", e, body))
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.jwt.secret = "test-secret-key-for-testing-only-32chars".to_string();
    config
}
