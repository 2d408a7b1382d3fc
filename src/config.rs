//! # Binding Configuration
//!
//! Holds the one configurable piece of the binding pipeline: the resolver
//! that turns a parameter's context into a lookup filter. Supplied once at
//! registration time and applied uniformly to every parameter.

use std::sync::Arc;

use crate::resolver::{DefaultResolver, ModelResolver};

/// Configuration for route model binding behavior.
#[derive(Clone)]
pub struct BindingConfig {
    resolver: Arc<dyn ModelResolver>,
}

impl BindingConfig {
    /// Configure a custom resolver applied to every route parameter.
    pub fn new(resolver: impl ModelResolver + 'static) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    pub fn resolver(&self) -> &dyn ModelResolver {
        self.resolver.as_ref()
    }
}

impl Default for BindingConfig {
    /// Identity-by-id lookups, with no soft-delete or other scoping.
    fn default() -> Self {
        Self::new(DefaultResolver)
    }
}

impl std::fmt::Debug for BindingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingConfig").finish_non_exhaustive()
    }
}
