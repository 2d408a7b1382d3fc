//! # Handler-Side Accessor
//!
//! [`RouteModels`] hands a handler the route model store the binding
//! middleware populated for this request. It is a pure accessor: no lookup,
//! no validation, no fallback. Requesting it on a route the middleware was
//! never applied to rejects with an internal error rather than an empty
//! store, so a missing layer shows up immediately.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::BindingError;
use crate::store::RouteModelStore;

/// Extractor for the per-request [`RouteModelStore`].
///
/// ```rust,no_run
/// use axum::Json;
/// use route_model_binding::{BindingError, RouteModels};
/// use serde_json::{json, Value};
///
/// async fn show_post(RouteModels(models): RouteModels) -> Result<Json<Value>, BindingError> {
///     let user: Value = models.model("user")?;
///     let post: Value = models.model("post")?;
///     Ok(Json(json!({ "user": user, "post": post })))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RouteModels(pub RouteModelStore);

impl<S> FromRequestParts<S> for RouteModels
where
    S: Send + Sync,
{
    type Rejection = BindingError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RouteModelStore>()
            .cloned()
            .map(RouteModels)
            .ok_or(BindingError::StoreUnavailable)
    }
}
