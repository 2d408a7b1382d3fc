//! # Demo Server
//!
//! End-to-end wiring of the binding middleware over in-memory users and
//! posts. Seeds one user with one post, logs their ids, and serves
//! `/users/{user}` and `/users/{user}/posts/{post}`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::{Json, Router};
use route_model_binding::logging::init_logging;
use route_model_binding::memory::InMemorySource;
use route_model_binding::{BindingError, RouteModelBinding, RouteModels};
use serde_json::{json, Value};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct ServerSettings {
    bind_address: String,
    request_timeout: Duration,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        let bind_address =
            std::env::var("RMB_BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        let timeout_seconds = match std::env::var("RMB_REQUEST_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("invalid RMB_REQUEST_TIMEOUT_SECONDS")?,
            Err(_) => 30,
        };

        Ok(Self {
            bind_address,
            request_timeout: Duration::from_secs(timeout_seconds),
        })
    }
}

fn seeded_source() -> Result<InMemorySource> {
    let mut source = InMemorySource::new();
    source.register("user", "User");
    source.register("post", "Post");

    let user_id = Uuid::new_v4();
    let post_id = Uuid::new_v4();
    source.insert(
        "user",
        json!({ "id": user_id, "username": "ada", "deleted_at": null }),
    )?;
    source.insert(
        "post",
        json!({ "id": post_id, "author_id": user_id, "content": "hello", "deleted_at": null }),
    )?;

    info!(%user_id, %post_id, "seeded demo data");
    Ok(source)
}

async fn show_user(RouteModels(models): RouteModels) -> Result<Json<Value>, BindingError> {
    let user: Value = models.model("user")?;
    Ok(Json(json!({ "user": user })))
}

async fn show_post(RouteModels(models): RouteModels) -> Result<Json<Value>, BindingError> {
    let user: Value = models.model("user")?;
    let post: Value = models.model("post")?;
    Ok(Json(json!({ "user": user, "post": post })))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let settings = ServerSettings::from_env()?;
    let source = seeded_source()?;
    let binding = RouteModelBinding::new(Arc::new(source));

    let app = binding
        .apply(
            Router::new()
                .route("/users/{user}", get(show_user))
                .route("/users/{user}/posts/{post}", get(show_post)),
        )
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&settings.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_address))?;

    info!(address = %settings.bind_address, "demo server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
