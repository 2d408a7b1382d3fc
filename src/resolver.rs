//! # Resolver Contract
//!
//! A resolver maps a route parameter to the [`Filter`] used for its entity
//! lookup. One resolver is configured per application and applied uniformly
//! to every parameter; implementations that need per-parameter behavior
//! branch on [`ResolverContext::param_name`].
//!
//! Resolvers may be asynchronous. The middleware awaits each resolution
//! before the lookup and resolves parameters strictly sequentially, so a
//! resolver inspecting [`ResolverContext::route_models`] always observes a
//! fully-settled set of the entities resolved earlier in the same request.

use async_trait::async_trait;
use axum::http::request::Parts;

use crate::filter::Filter;
use crate::store::RouteModelStore;

/// Everything a resolver needs to build the lookup filter for one parameter.
///
/// Constructed fresh for each parameter just before the resolver runs and
/// never kept beyond the request.
#[derive(Debug)]
pub struct ResolverContext<'a> {
    /// Raw parameter value as it appeared in the path.
    pub id: &'a str,
    /// Head of the originating request, for resolvers that inspect headers,
    /// URI, or extensions.
    pub request: &'a Parts,
    /// Entities resolved earlier in this request, keyed by original
    /// parameter name. Enables dependent, parent-scoped lookups.
    pub route_models: &'a RouteModelStore,
    /// Parameter name with its original casing.
    pub param_name: &'a str,
}

/// Strategy for turning a parameter's context into a lookup filter.
#[async_trait]
pub trait ModelResolver: Send + Sync {
    async fn resolve(&self, ctx: ResolverContext<'_>) -> Filter;
}

/// The resolver used when no configuration is supplied: match on `id` alone,
/// with no soft-delete or other scoping.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

#[async_trait]
impl ModelResolver for DefaultResolver {
    async fn resolve(&self, ctx: ResolverContext<'_>) -> Filter {
        Filter::by_id(ctx.id)
    }
}
