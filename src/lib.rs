#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Route Model Binding
//!
//! Axum middleware that resolves route path parameters into persisted entities
//! before a request reaches handler code.
//!
//! ## Overview
//!
//! Given a route such as `/users/{user}/posts/{post}`, the binding middleware
//! walks the matched path parameters in order, looks each one up through a
//! repository keyed by the lower-cased parameter name, and stores the resolved
//! entities on the request. Handlers then read fully-resolved models through a
//! typed accessor instead of repeating lookup boilerplate per endpoint.
//!
//! The lookup filter for each parameter is produced by a pluggable
//! [`ModelResolver`]. The default resolver matches on `id` alone; custom
//! resolvers can add soft-delete scoping, branch per parameter name, or build
//! dependent filters from entities resolved earlier in the same request.
//!
//! ## Module Organization
//!
//! - [`middleware`] - The binding middleware and its registration handle
//! - [`resolver`] - Resolver contract, context, and the default resolver
//! - [`filter`] - Structural lookup filters passed to repositories
//! - [`repository`] - Persistence collaborator traits
//! - [`store`] - The per-request route model store
//! - [`extract`] - Handler-side accessor for resolved models
//! - [`memory`] - In-memory repositories for demos and tests
//! - [`postgres`] - SQLx/Postgres-backed repositories
//! - [`error`] - Structured error handling with HTTP conversions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::{routing::get, Json, Router};
//! use route_model_binding::memory::InMemorySource;
//! use route_model_binding::{BindingError, RouteModelBinding, RouteModels};
//! use serde_json::{json, Value};
//!
//! async fn show_user(RouteModels(models): RouteModels) -> Result<Json<Value>, BindingError> {
//!     let user: Value = models.model("user")?;
//!     Ok(Json(json!({ "user": user })))
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut source = InMemorySource::new();
//!     source.register("user", "User");
//!
//!     let binding = RouteModelBinding::new(Arc::new(source));
//!     let app = binding.apply(Router::new().route("/users/{user}", get(show_user)));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod logging;
pub mod memory;
pub mod middleware;
pub mod postgres;
pub mod repository;
pub mod resolver;
pub mod store;

// Re-export the types that make up the public binding surface
pub use config::BindingConfig;
pub use error::{BindingError, BindingResult};
pub use extract::RouteModels;
pub use filter::{Filter, FilterValue};
pub use middleware::{bind_route_models, RouteModelBinding};
pub use repository::{Entity, ModelSource, Repository, RepositoryError};
pub use resolver::{DefaultResolver, ModelResolver, ResolverContext};
pub use store::RouteModelStore;
