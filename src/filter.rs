//! # Lookup Filters
//!
//! Structural field constraints produced by resolvers and consumed by
//! repository lookups. A [`Filter`] is an ordered list of `(field, value)`
//! pairs; the binding middleware passes it through opaquely, and repository
//! implementations translate it into their own query form with bound
//! parameters. Raw parameter values are never spliced into query text.

use uuid::Uuid;

/// A single constraint value inside a [`Filter`].
///
/// `Null` expresses an "is unset" constraint, matching SQL `IS NULL`
/// semantics. This is what soft-delete resolvers use for `deleted_at`.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Bool(bool),
    Null,
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

/// An ordered set of field constraints for a single-entity lookup.
///
/// All constraints are combined conjunctively: an entity matches when every
/// field matches. The order fields were added in is preserved, which keeps
/// generated queries deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    constraints: Vec<(String, FilterValue)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity filter: match on the `id` field alone.
    pub fn by_id(id: impl Into<FilterValue>) -> Self {
        Self::new().field("id", id)
    }

    /// Add a field constraint, builder-style.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.constraints.push((name.into(), value.into()));
        self
    }

    pub fn constraints(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.constraints.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_id_builds_a_single_text_constraint() {
        let filter = Filter::by_id("abc-123");

        let constraints: Vec<_> = filter.constraints().collect();
        assert_eq!(
            constraints,
            vec![("id", &FilterValue::Text("abc-123".to_string()))]
        );
    }

    #[test]
    fn field_order_is_preserved() {
        let filter = Filter::by_id("1")
            .field("deleted_at", FilterValue::Null)
            .field("published", true);

        let names: Vec<_> = filter.constraints().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "deleted_at", "published"]);
        assert_eq!(filter.len(), 3);
    }

    #[test]
    fn conversions_cover_common_key_types() {
        let id = Uuid::new_v4();
        assert_eq!(FilterValue::from(id), FilterValue::Text(id.to_string()));
        assert_eq!(FilterValue::from(7i64), FilterValue::Integer(7));
        assert_eq!(FilterValue::from(false), FilterValue::Bool(false));
    }
}
