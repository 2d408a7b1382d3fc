//! # Postgres Repositories
//!
//! A [`ModelSource`] over SQLx/Postgres. Each repository maps one route
//! parameter key to one table and compiles lookup filters into
//! bound-parameter queries with `QueryBuilder`.
//!
//! Filters stay structural all the way down: field names must pass the
//! identifier check and values are always bound, never spliced into the
//! SQL text. Rows come back as `to_jsonb(..)` so entities keep their opaque
//! JSON representation across the binding boundary.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::filter::{Filter, FilterValue};
use crate::repository::{Entity, ModelSource, Repository, RepositoryError};

/// Accept only unquoted Postgres identifiers: lower-case ASCII, digits, and
/// underscores, not starting with a digit.
fn ensure_identifier(identifier: &str) -> Result<(), RepositoryError> {
    let mut chars = identifier.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    let tail_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if head_ok && tail_ok {
        Ok(())
    } else {
        Err(RepositoryError::invalid_identifier(identifier))
    }
}

/// Compile a filter into a single-row lookup against `table`.
///
/// `table` is validated at registration time; filter fields are validated
/// here because they originate from resolvers at runtime.
fn build_lookup(
    table: &str,
    filter: &Filter,
) -> Result<QueryBuilder<'static, Postgres>, RepositoryError> {
    let mut builder = QueryBuilder::new("SELECT to_jsonb(t) FROM ");
    builder.push(table);
    builder.push(" t");

    let mut prefix = " WHERE ";
    for (field, value) in filter.constraints() {
        ensure_identifier(field)?;
        builder.push(prefix);
        prefix = " AND ";
        builder.push("t.");
        builder.push(field);

        match value {
            // Compare through ::text so uuid and varchar keys both work
            FilterValue::Text(text) => {
                builder.push("::text = ");
                builder.push_bind(text.clone());
            }
            FilterValue::Integer(integer) => {
                builder.push(" = ");
                builder.push_bind(*integer);
            }
            FilterValue::Bool(boolean) => {
                builder.push(" = ");
                builder.push_bind(*boolean);
            }
            FilterValue::Null => {
                builder.push(" IS NULL");
            }
        }
    }

    builder.push(" LIMIT 1");
    Ok(builder)
}

/// Lookup over one table, returning rows as JSON entities.
pub struct PgRepository {
    pool: PgPool,
    table: String,
    entity_name: String,
}

impl PgRepository {
    pub fn new(
        pool: PgPool,
        table: impl Into<String>,
        entity_name: impl Into<String>,
    ) -> Result<Self, RepositoryError> {
        let table = table.into();
        ensure_identifier(&table)?;
        Ok(Self {
            pool,
            table,
            entity_name: entity_name.into(),
        })
    }
}

#[async_trait]
impl Repository for PgRepository {
    fn entity_name(&self) -> &str {
        &self.entity_name
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Entity>, RepositoryError> {
        let mut builder = build_lookup(&self.table, filter)?;
        let row = builder
            .build_query_scalar::<Entity>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

/// Repository registry over one connection pool.
pub struct PgSource {
    pool: PgPool,
    repositories: HashMap<String, PgRepository>,
}

impl PgSource {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            repositories: HashMap::new(),
        }
    }

    /// Register `table` under the route parameter `key` with the given
    /// entity display name. Fails on invalid table identifiers.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        table: impl Into<String>,
        entity_name: impl Into<String>,
    ) -> Result<(), RepositoryError> {
        let repository = PgRepository::new(self.pool.clone(), table, entity_name)?;
        self.repositories.insert(key.into(), repository);
        Ok(())
    }
}

impl ModelSource for PgSource {
    fn repository(&self, key: &str) -> Result<&dyn Repository, RepositoryError> {
        self.repositories
            .get(key)
            .map(|repository| repository as &dyn Repository)
            .ok_or_else(|| RepositoryError::unknown_repository(key))
    }
}
