//! Filter-clause compilation.
//!
//! Turns an ordered, multi-valued filter specification into a clause fragment
//! with named placeholders plus the map of placeholder bindings. Placeholder
//! names form one monotonically increasing sequence (`p1`, `p2`, …) across the
//! whole specification, so the fragment can be appended to a larger query
//! without renumbering.

use crate::error::{CoordinatorError, Result};
use std::collections::HashMap;
use std::fmt;

/// Comparison operator of one filter entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterComparator {
    /// Multi-valued membership, compiled to `IN (…)`.
    Equals,
    /// Multi-valued exclusion, compiled to `NOT IN (…)`.
    NotEquals,
    Greater,
    GreaterEqual,
    LessThan,
    LessThanEqual,
}

impl FilterComparator {
    /// SQL operator text for the single-valued comparators.
    fn sign(&self) -> &'static str {
        match self {
            FilterComparator::Equals => "=",
            FilterComparator::NotEquals => "!=",
            FilterComparator::Greater => ">",
            FilterComparator::GreaterEqual => ">=",
            FilterComparator::LessThan => "<",
            FilterComparator::LessThanEqual => "<=",
        }
    }

    /// Whether the comparator accepts more than one value.
    fn is_multi_valued(&self) -> bool {
        matches!(self, FilterComparator::Equals | FilterComparator::NotEquals)
    }
}

impl fmt::Display for FilterComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sign())
    }
}

/// One `(field, comparator) -> values` entry of a filter specification.
#[derive(Debug, Clone)]
pub struct FilterEntry {
    pub field: String,
    pub comparator: FilterComparator,
    pub values: Vec<serde_json::Value>,
}

/// An ordered filter specification.
///
/// Entry order is significant: it determines both clause order and parameter
/// numbering. Built by the API layer from request filter syntax; read-only
/// here.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    entries: Vec<FilterEntry>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry, preserving insertion order.
    pub fn push(
        &mut self,
        field: impl Into<String>,
        comparator: FilterComparator,
        values: Vec<serde_json::Value>,
    ) -> &mut Self {
        self.entries.push(FilterEntry {
            field: field.into(),
            comparator,
            values,
        });
        self
    }

    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Map a filter field to its physical column. Fail-closed: unknown fields are
/// rejected, never passed through to SQL.
fn column_for_field(field: &str) -> Result<&'static str> {
    match field {
        "status" => Ok("a.statusStr"),
        "nominal_time" => Ok("a.nominalTimestamp"),
        other => Err(CoordinatorError::InvalidFilterField {
            field: other.to_string(),
        }),
    }
}

/// Compile a filter specification into `clause` and return the placeholder
/// bindings.
///
/// Each entry appends ` AND <column> <condition>`; the whole fragment ends
/// with a single trailing space so it can be concatenated directly into a
/// larger query. The keys of the returned map are exactly the placeholder
/// names embedded in the fragment.
pub fn build_filter_clause(
    filter: &FilterSpec,
    clause: &mut String,
) -> Result<HashMap<String, serde_json::Value>> {
    let mut params = HashMap::new();
    // Single monotonic placeholder counter for the whole call, threaded
    // through each append, never reset between entries.
    let mut counter: usize = 1;

    for entry in filter.entries() {
        let column = column_for_field(&entry.field)?;
        clause.push_str(" AND ");
        clause.push_str(column);
        clause.push(' ');

        if entry.comparator.is_multi_valued() {
            if entry.comparator == FilterComparator::NotEquals {
                clause.push_str("NOT IN (");
            } else {
                clause.push_str("IN (");
            }
            counter = append_placeholders(clause, &mut params, &entry.values, counter);
            clause.push(')');
        } else {
            if entry.values.len() != 1 {
                return Err(CoordinatorError::InvalidComparatorArity {
                    field: entry.field.clone(),
                    comparator: entry.comparator.sign().to_string(),
                    count: entry.values.len(),
                });
            }
            clause.push_str(entry.comparator.sign());
            clause.push(' ');
            counter = append_placeholders(clause, &mut params, &entry.values, counter);
        }
    }

    clause.push(' ');
    Ok(params)
}

/// Append one `:pN` placeholder per value, comma-separated, recording each
/// binding. Returns the counter value for the next placeholder.
fn append_placeholders(
    clause: &mut String,
    params: &mut HashMap<String, serde_json::Value>,
    values: &[serde_json::Value],
    start: usize,
) -> usize {
    let mut counter = start;
    for (i, value) in values.iter().enumerate() {
        let name = format!("p{counter}");
        if i > 0 {
            clause.push_str(", ");
        }
        clause.push(':');
        clause.push_str(&name);
        params.insert(name, value.clone());
        counter += 1;
    }
    counter
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equals_compiles_to_in_list() {
        let mut filter = FilterSpec::new();
        filter.push(
            "status",
            FilterComparator::Equals,
            vec![json!("RUNNING"), json!("KILLED")],
        );

        let mut clause = String::new();
        let params = build_filter_clause(&filter, &mut clause).unwrap();

        assert_eq!(clause, " AND a.statusStr IN (:p1, :p2) ");
        assert_eq!(params.len(), 2);
        assert_eq!(params["p1"], json!("RUNNING"));
        assert_eq!(params["p2"], json!("KILLED"));
    }

    #[test]
    fn test_not_equals_compiles_to_not_in_list() {
        let mut filter = FilterSpec::new();
        filter.push("status", FilterComparator::NotEquals, vec![json!("FAILED")]);

        let mut clause = String::new();
        let params = build_filter_clause(&filter, &mut clause).unwrap();

        assert_eq!(clause, " AND a.statusStr NOT IN (:p1) ");
        assert_eq!(params["p1"], json!("FAILED"));
    }

    #[test]
    fn test_counter_continues_across_entries() {
        let mut filter = FilterSpec::new();
        filter.push(
            "status",
            FilterComparator::Equals,
            vec![json!("RUNNING"), json!("KILLED")],
        );
        filter.push(
            "nominal_time",
            FilterComparator::Greater,
            vec![json!("2009-02-01T00:00Z")],
        );

        let mut clause = String::new();
        let params = build_filter_clause(&filter, &mut clause).unwrap();

        assert_eq!(
            clause,
            " AND a.statusStr IN (:p1, :p2) AND a.nominalTimestamp > :p3 "
        );
        assert_eq!(params.len(), 3);
        assert_eq!(params["p3"], json!("2009-02-01T00:00Z"));
    }

    #[test]
    fn test_relational_comparator_requires_one_value() {
        let mut filter = FilterSpec::new();
        filter.push(
            "nominal_time",
            FilterComparator::LessThanEqual,
            vec![json!("2009-02-01T00:00Z"), json!("2009-03-01T00:00Z")],
        );

        let mut clause = String::new();
        let err = build_filter_clause(&filter, &mut clause).unwrap_err();
        assert!(matches!(
            err,
            CoordinatorError::InvalidComparatorArity { count: 2, .. }
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut filter = FilterSpec::new();
        filter.push("created_at", FilterComparator::Equals, vec![json!("x")]);

        let mut clause = String::new();
        let err = build_filter_clause(&filter, &mut clause).unwrap_err();
        match err {
            CoordinatorError::InvalidFilterField { field } => assert_eq!(field, "created_at"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_spec_yields_single_space() {
        let mut clause = String::new();
        let params = build_filter_clause(&FilterSpec::new(), &mut clause).unwrap();
        assert_eq!(clause, " ");
        assert!(params.is_empty());
    }

    #[test]
    fn test_clause_appends_to_existing_buffer() {
        let mut filter = FilterSpec::new();
        filter.push("status", FilterComparator::Equals, vec![json!("WAITING")]);

        let mut clause = String::from("SELECT a FROM coord_actions a WHERE a.jobId = :job");
        build_filter_clause(&filter, &mut clause).unwrap();
        assert_eq!(
            clause,
            "SELECT a FROM coord_actions a WHERE a.jobId = :job AND a.statusStr IN (:p1) "
        );
    }
}
