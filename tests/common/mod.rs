//! Shared fixtures for the binding integration tests: demo entities, a
//! seeded in-memory source, and a router over
//! `/users/{user}/posts/{post}`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use route_model_binding::memory::InMemorySource;
use route_model_binding::{BindingConfig, BindingError, RouteModelBinding, RouteModels};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn active(username: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            deleted_at: None,
        }
    }

    pub fn deleted(username: &str) -> Self {
        Self {
            deleted_at: Some(Utc::now()),
            ..Self::active(username)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn by(author: &User, content: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id: author.id,
            content: content.to_string(),
            deleted_at: None,
        }
    }

    pub fn deleted_by(author: &User, content: &str) -> Self {
        Self {
            deleted_at: Some(Utc::now()),
            ..Self::by(author, content)
        }
    }
}

/// `user` and `post` repositories seeded with the given rows.
pub fn seeded_source(users: &[User], posts: &[Post]) -> Arc<InMemorySource> {
    let mut source = InMemorySource::new();
    source.register("user", "User");
    source.register("post", "Post");

    for user in users {
        source
            .insert("user", serde_json::to_value(user).unwrap())
            .unwrap();
    }
    for post in posts {
        source
            .insert("post", serde_json::to_value(post).unwrap())
            .unwrap();
    }

    Arc::new(source)
}

async fn show_post(RouteModels(models): RouteModels) -> Result<Json<Value>, BindingError> {
    let user: Value = models.model("user")?;
    let post: Value = models.model("post")?;
    Ok(Json(json!({ "user": user, "post": post })))
}

/// Router over `/users/{user}/posts/{post}` with the binding applied.
pub fn app(source: Arc<InMemorySource>, config: BindingConfig) -> Router {
    let binding = RouteModelBinding::with_config(source, config);
    binding.apply(Router::new().route("/users/{user}/posts/{post}", get(show_post)))
}

/// Drive one GET through the router in-process and parse the JSON body.
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

/// Percent-encode a path segment the way a client would.
pub fn encode_segment(raw: &str) -> String {
    let mut encoded = String::new();
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
