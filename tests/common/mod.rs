#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use pawhub::router::init_router;
use pawhub::state::AppState;
use pawhub_auth::create_access_token;
use pawhub_cache::{CacheConfig, MemoryStore, PermissionCache};
use pawhub_config::{CorsConfig, JwtConfig};
use pawhub_core::hash_password;
use pawhub_db::{AdminDirectory, MemoryAdminDirectory, NewAdmin};
use pawhub_models::AdminAccount;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub directory: Arc<MemoryAdminDirectory>,
    pub cache: PermissionCache,
    pub jwt_config: JwtConfig,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new("test-secret-key-at-least-32-characters-long", 3600)
}

/// State over `directory` with an in-memory permission cache.
pub fn test_state(directory: Arc<dyn AdminDirectory>) -> AppState {
    AppState {
        directory,
        permission_cache: PermissionCache::new(Arc::new(MemoryStore::new()), &CacheConfig::default()),
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig::from_list("http://localhost:5173"),
    }
}

pub fn setup_test_app() -> TestApp {
    let directory = Arc::new(MemoryAdminDirectory::new());
    let state = test_state(directory.clone());

    TestApp {
        cache: state.permission_cache.clone(),
        jwt_config: state.jwt_config.clone(),
        router: init_router(state),
        directory,
    }
}

impl TestApp {
    /// Seed an administrator that can only be reached with a minted token.
    pub async fn create_admin(&self, username: &str, privileges: Option<&str>) -> AdminAccount {
        self.insert(username, "!".to_string(), privileges).await
    }

    /// Seed an administrator that can log in with `password`.
    pub async fn create_admin_with_password(
        &self,
        username: &str,
        password: &str,
        privileges: Option<&str>,
    ) -> AdminAccount {
        self.insert(username, hash_password(password).unwrap(), privileges)
            .await
    }

    async fn insert(
        &self,
        username: &str,
        password_hash: String,
        privileges: Option<&str>,
    ) -> AdminAccount {
        self.directory
            .create_admin(NewAdmin {
                username: username.to_string(),
                password_hash,
                privileges: privileges.map(str::to_string),
            })
            .await
            .unwrap()
    }

    pub fn token_for(&self, admin: &AdminAccount) -> String {
        create_access_token(admin.id, &admin.username, &self.jwt_config).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request("GET", uri, token, None)).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(request("POST", uri, token, Some(body))).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(request("PUT", uri, token, Some(body))).await
    }
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn codes(value: &Value) -> Vec<&str> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
