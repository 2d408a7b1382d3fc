//! # Route Model Store
//!
//! Per-request mapping from route parameter name to resolved entity. The
//! binding middleware populates it incrementally, parameter by parameter,
//! then attaches it to the request extensions; handlers read it back through
//! [`RouteModels`](crate::extract::RouteModels).
//!
//! Keys keep the parameter's original casing even though repositories are
//! selected by the lower-cased name, and insertion order follows parameter
//! iteration order.

use serde::de::DeserializeOwned;

use crate::error::{BindingError, BindingResult};
use crate::repository::Entity;

/// Ordered map of resolved route models for one request.
#[derive(Debug, Clone, Default)]
pub struct RouteModelStore {
    entries: Vec<(String, Entity)>,
}

impl RouteModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity under `name`, replacing any previous entry for the
    /// same name while keeping its position.
    pub fn insert(&mut self, name: impl Into<String>, entity: Entity) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = entity,
            None => self.entries.push((name, entity)),
        }
    }

    /// The raw entity stored under `name`, if any. Names are compared
    /// case-sensitively, exactly as they appeared in the route template.
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, entity)| entity)
    }

    /// Typed accessor: deserialize the entity stored under `name` into `T`.
    ///
    /// This is a pure read of state the middleware already populated; it
    /// performs no lookup or fallback.
    pub fn model<T: DeserializeOwned>(&self, name: &str) -> BindingResult<T> {
        let entity = self.get(name).ok_or_else(|| BindingError::ModelNotBound {
            param: name.to_string(),
        })?;

        serde_json::from_value(entity.clone()).map_err(|_| BindingError::ModelType {
            param: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Parameter names in resolution order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.entries
            .iter()
            .map(|(key, entity)| (key.as_str(), entity))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
