#![allow(dead_code)]

use std::sync::{Arc, Once};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

use trainer_service::api::routes::create_app;
use trainer_service::auth::JwtService;
use trainer_service::repository::InMemoryTrainerRepository;
use trainer_service::services::TrainerService;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_only";

/// User id of the seeded demo trainer
pub const TRAINER_USER_ID: i64 = 1;

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("trainer_service=debug")
            .with_test_writer()
            .try_init();
    });
}

pub struct TestApp {
    pub app: NormalizePath<Router>,
    pub repo: Arc<InMemoryTrainerRepository>,
    pub jwt_service: JwtService,
}

impl TestApp {
    /// App over the seeded in-memory store
    pub async fn new() -> Self {
        init_test_logging();

        let repo = Arc::new(InMemoryTrainerRepository::new());
        repo.seed_demo().await;

        let jwt_service = JwtService::new(TEST_SECRET);
        let app = create_app(TrainerService::new(repo.clone()), jwt_service.clone());

        Self {
            app,
            repo,
            jwt_service,
        }
    }

    pub fn token_for(&self, user_id: i64) -> String {
        self.jwt_service.issue_token(user_id).unwrap()
    }

    pub fn trainer_token(&self) -> String {
        format!("Bearer {}", self.token_for(TRAINER_USER_ID))
    }

    /// Send a request with an optional raw `Authorization` value and JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(authorization) = authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    /// Send a prebuilt request, decoding the JSON body
    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let token = self.trainer_token();
        self.send(Method::GET, uri, Some(token.as_str()), None).await
    }

    pub async fn send_json(&self, method: Method, uri: &str, body: &Value) -> (StatusCode, Value) {
        let token = self.trainer_token();
        self.send(method, uri, Some(token.as_str()), Some(body.to_string().as_str()))
            .await
    }
}
