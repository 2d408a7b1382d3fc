//! # Persistence Collaborator Traits
//!
//! The binding middleware does not own a persistence engine. It talks to one
//! through two narrow traits: [`ModelSource`], which resolves a repository
//! from a lower-cased route parameter key, and [`Repository`], which performs
//! a single-entity lookup against a [`Filter`].
//!
//! Repository resolution failures are configuration errors, not lookup
//! misses: an unknown key propagates unmodified and aborts the request.

use async_trait::async_trait;
use thiserror::Error;

use crate::filter::Filter;

/// A resolved entity as an opaque record.
///
/// Entities cross the binding boundary as JSON values so the store can hold
/// heterogeneous types per request. Handlers recover concrete types through
/// [`RouteModelStore::model`](crate::store::RouteModelStore::model).
pub type Entity = serde_json::Value;

/// Errors raised by the persistence collaborator.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("no repository registered for route parameter key '{key}'")]
    UnknownRepository { key: String },

    #[error("invalid identifier '{identifier}' in lookup filter")]
    InvalidIdentifier { identifier: String },

    #[error("lookup failed: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    pub fn unknown_repository(key: impl Into<String>) -> Self {
        Self::UnknownRepository { key: key.into() }
    }

    pub fn invalid_identifier(identifier: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
        }
    }
}

/// Single-entity lookup over one entity type.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Display name of the entity type, used verbatim in error messages.
    fn entity_name(&self) -> &str;

    /// Find at most one entity matching every constraint in `filter`.
    async fn find_one(&self, filter: &Filter) -> Result<Option<Entity>, RepositoryError>;
}

/// Registry of repositories keyed by lower-cased route parameter name.
pub trait ModelSource: Send + Sync {
    /// Resolve the repository for `key`.
    ///
    /// Implementations return [`RepositoryError::UnknownRepository`] when no
    /// repository is registered under `key`; the middleware propagates that
    /// error untouched.
    fn repository(&self, key: &str) -> Result<&dyn Repository, RepositoryError>;
}
