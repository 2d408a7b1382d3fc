//! # In-Memory Repositories
//!
//! A [`ModelSource`] backed by JSON row sets held in memory. Used by the
//! demo server and the integration tests; also handy as a reference for
//! writing a source over a real persistence engine.
//!
//! Filter matching follows SQL comparison semantics: every constraint must
//! match, and [`FilterValue::Null`] matches a field that is JSON `null` or
//! absent from the row.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::filter::{Filter, FilterValue};
use crate::repository::{Entity, ModelSource, Repository, RepositoryError};

/// One entity type's rows, scanned linearly on lookup.
pub struct InMemoryRepository {
    entity_name: String,
    rows: RwLock<Vec<Entity>>,
}

impl InMemoryRepository {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            rows: RwLock::new(Vec::new()),
        }
    }

    pub fn insert(&self, row: Entity) {
        self.rows.write().push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

fn field_matches(row: &Entity, field: &str, expected: &FilterValue) -> bool {
    let actual = row.get(field);
    match (actual, expected) {
        (Some(Value::String(s)), FilterValue::Text(t)) => s == t,
        (Some(value), FilterValue::Integer(i)) => value.as_i64() == Some(*i),
        (Some(Value::Bool(b)), FilterValue::Bool(expected)) => b == expected,
        (None | Some(Value::Null), FilterValue::Null) => true,
        _ => false,
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    fn entity_name(&self) -> &str {
        &self.entity_name
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Entity>, RepositoryError> {
        let rows = self.rows.read();
        let found = rows
            .iter()
            .find(|row| {
                filter
                    .constraints()
                    .all(|(field, value)| field_matches(row, field, value))
            })
            .cloned();
        Ok(found)
    }
}

/// Repository registry keyed by lower-cased route parameter name.
#[derive(Default)]
pub struct InMemorySource {
    repositories: HashMap<String, InMemoryRepository>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty repository under `key` with the given entity
    /// display name.
    pub fn register(&mut self, key: impl Into<String>, entity_name: impl Into<String>) {
        self.repositories
            .insert(key.into(), InMemoryRepository::new(entity_name));
    }

    /// Insert a row into the repository registered under `key`.
    pub fn insert(&self, key: &str, row: Entity) -> Result<(), RepositoryError> {
        self.repositories
            .get(key)
            .ok_or_else(|| RepositoryError::unknown_repository(key))?
            .insert(row);
        Ok(())
    }

    /// Row count for the repository under `key`, for assertions in tests.
    pub fn row_count(&self, key: &str) -> Result<usize, RepositoryError> {
        Ok(self
            .repositories
            .get(key)
            .ok_or_else(|| RepositoryError::unknown_repository(key))?
            .len())
    }
}

impl ModelSource for InMemorySource {
    fn repository(&self, key: &str) -> Result<&dyn Repository, RepositoryError> {
        self.repositories
            .get(key)
            .map(|repository| repository as &dyn Repository)
            .ok_or_else(|| RepositoryError::unknown_repository(key))
    }
}
