//! # Binding Middleware
//!
//! The resolution core: runs once per request before the handler, walks the
//! matched route parameters in path order, resolves each to an entity, and
//! attaches the accumulated [`RouteModelStore`] to the request.
//!
//! Resolution is strictly sequential. Each parameter's resolver sees the
//! entities resolved before it, so dependent lookups (a post scoped to an
//! already-resolved user) compose without any concurrency primitives. Any
//! failure short-circuits the remaining parameters; the handler never runs
//! against a partially-populated store.

use std::sync::Arc;

use axum::extract::{FromRequestParts, RawPathParams, Request, State};
use axum::http::request::Parts;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tracing::{debug, warn};

use crate::config::BindingConfig;
use crate::error::{BindingError, BindingResult};
use crate::repository::ModelSource;
use crate::resolver::ResolverContext;
use crate::store::RouteModelStore;

/// Registration handle tying a [`ModelSource`] to a [`BindingConfig`].
///
/// Clone-cheap; hand it to [`apply`](Self::apply) to layer the binding
/// middleware onto a router.
#[derive(Clone)]
pub struct RouteModelBinding {
    source: Arc<dyn ModelSource>,
    config: BindingConfig,
}

impl RouteModelBinding {
    /// Bind against `source` with the default identity-by-id resolver.
    pub fn new(source: Arc<dyn ModelSource>) -> Self {
        Self::with_config(source, BindingConfig::default())
    }

    /// Bind against `source` with a custom resolver configuration.
    pub fn with_config(source: Arc<dyn ModelSource>, config: BindingConfig) -> Self {
        Self { source, config }
    }

    /// Layer the binding middleware onto `router`.
    pub fn apply<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(middleware::from_fn_with_state(
            self.clone(),
            bind_route_models,
        ))
    }
}

/// Middleware function that binds route parameters to model instances.
///
/// For each path parameter the repository is selected by the lower-cased
/// parameter name, the configured resolver builds a lookup filter from the
/// raw value, and the resolved entity is stored under the original-cased
/// name. Routes without path parameters pass through untouched.
pub async fn bind_route_models(
    State(binding): State<RouteModelBinding>,
    request: Request,
    next: Next,
) -> Result<Response, BindingError> {
    let (mut parts, body) = request.into_parts();

    // Taken from the parts rather than the extractor list so that
    // param-less routes and fallbacks pass through instead of rejecting.
    let params = RawPathParams::from_request_parts(&mut parts, &()).await;

    // Extend an existing store if the middleware already ran on this request
    let mut store = parts
        .extensions
        .remove::<RouteModelStore>()
        .unwrap_or_default();

    match params {
        Ok(params) => {
            for (name, raw) in &params {
                resolve_parameter(&binding, &parts, &mut store, name, raw).await?;
            }
        }
        Err(rejection) => {
            debug!(reason = %rejection, "no path parameters to bind");
        }
    }

    parts.extensions.insert(store);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Resolve a single route parameter into the store.
///
/// The store is only mutated on a successful lookup; every failure leaves it
/// exactly as it was and aborts the request.
async fn resolve_parameter(
    binding: &RouteModelBinding,
    request: &Parts,
    store: &mut RouteModelStore,
    name: &str,
    raw: &str,
) -> BindingResult<()> {
    let key = name.to_lowercase();
    let repository = binding.source.repository(&key)?;
    let entity_name = repository.entity_name();

    if raw.is_empty() {
        return Err(BindingError::invalid_argument(entity_name));
    }

    let filter = binding
        .config
        .resolver()
        .resolve(ResolverContext {
            id: raw,
            request,
            route_models: store,
            param_name: name,
        })
        .await;

    match repository.find_one(&filter).await? {
        Some(entity) => {
            debug!(param = name, entity = entity_name, "bound route model");
            store.insert(name, entity);
            Ok(())
        }
        None => {
            warn!(
                param = name,
                entity = entity_name,
                id = raw,
                "route model lookup matched nothing"
            );
            Err(BindingError::not_found(entity_name, raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemorySource;
    use crate::repository::RepositoryError;
    use axum::body::Body;
    use serde_json::json;

    fn binding_with_users() -> RouteModelBinding {
        let mut source = InMemorySource::new();
        source.register("user", "User");
        source
            .insert("user", json!({ "id": "u1", "username": "ada" }))
            .unwrap();
        RouteModelBinding::new(Arc::new(source))
    }

    fn request_parts() -> Parts {
        Request::builder()
            .uri("/users/u1")
            .body(Body::empty())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn stores_the_entity_under_the_original_cased_name() {
        let binding = binding_with_users();
        let parts = request_parts();
        let mut store = RouteModelStore::new();

        resolve_parameter(&binding, &parts, &mut store, "USER", "u1")
            .await
            .unwrap();

        assert!(store.contains("USER"));
        assert!(!store.contains("user"));
        assert_eq!(store.get("USER").unwrap()["username"], "ada");
    }

    #[tokio::test]
    async fn empty_value_fails_before_any_store_mutation() {
        let binding = binding_with_users();
        let parts = request_parts();
        let mut store = RouteModelStore::new();

        let err = resolve_parameter(&binding, &parts, &mut store, "user", "")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "The id for User is not valid");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn unknown_repository_key_propagates_the_source_error() {
        let binding = binding_with_users();
        let parts = request_parts();
        let mut store = RouteModelStore::new();

        let err = resolve_parameter(&binding, &parts, &mut store, "team", "t1")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BindingError::Repository(RepositoryError::UnknownRepository { ref key }) if key == "team"
        ));
    }

    #[tokio::test]
    async fn lookup_miss_reports_the_raw_id() {
        let binding = binding_with_users();
        let parts = request_parts();
        let mut store = RouteModelStore::new();

        let err = resolve_parameter(&binding, &parts, &mut store, "user", "missing")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Could not find User with id missing");
        assert!(store.is_empty());
    }
}
