//! # Scope Resolution
//!
//! Turns a user-supplied scope expression into the concrete set of
//! [`CoordinatorAction`] records it denotes. A scope is a comma-separated list
//! of elements; each element is either a date range (`start::end`), a single
//! nominal time, an action-number range (`1-5`), or a single action number.
//!
//! The route (date vs action) is selected by the caller through [`ScopeType`],
//! never auto-detected per token: the REST layer already knows which kind of
//! scope the request carries.
//!
//! Resolution is tolerant in exactly one place: on the action route, an
//! identifier the store reports as absent is an action that has not been
//! materialized yet, and is skipped with a warning. Every other miss or
//! malformed token aborts the call with no partial result.

pub mod actions;
pub mod dates;

use crate::error::{CoordinatorError, Result};
use crate::models::CoordinatorAction;
use crate::store::ActionStore;
use chrono::NaiveDateTime;
use std::str::FromStr;

/// Separator between the two ends of a date range element.
pub const DATE_RANGE_SEPARATOR: &str = "::";

/// Nominal times are written in UTC with minute precision, e.g.
/// `2026-08-30T10:00Z`.
const NOMINAL_TIME_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Which kind of elements a scope expression contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeType {
    /// Date ranges and single nominal times.
    Date,
    /// Action-number ranges and single action numbers.
    Action,
}

impl ScopeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeType::Date => "date",
            ScopeType::Action => "action",
        }
    }
}

impl FromStr for ScopeType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "date" => Ok(ScopeType::Date),
            "action" => Ok(ScopeType::Action),
            other => Err(format!("unknown scope type: {other}")),
        }
    }
}

/// One classified element of a scope expression.
///
/// Date tokens keep their raw text; the resolvers parse them so that a parse
/// failure can name the offending substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeToken {
    DateRange { start: String, end: String },
    SingleDate { date: String },
    IdRange { start: i32, end: i32 },
    SingleId { n: i32 },
}

/// Resolve a scope expression into the deduplicated set of actions it denotes.
///
/// `active_only` restricts date-range lookups to actions in a non-terminal
/// status. The order of the returned records is not significant.
pub async fn resolve_scope(
    store: &dyn ActionStore,
    range_type: ScopeType,
    job_id: &str,
    scope: &str,
    active_only: bool,
) -> Result<Vec<CoordinatorAction>> {
    if job_id.trim().is_empty() {
        return Err(CoordinatorError::invalid_scope("job id must not be empty"));
    }
    match range_type {
        ScopeType::Date => dates::resolve_date_scope(store, job_id, scope, active_only).await,
        ScopeType::Action => actions::resolve_action_scope(store, job_id, scope).await,
    }
}

/// Split a scope expression on `,` and trim each element.
///
/// An empty expression or an empty element is a format error.
pub(crate) fn split_scope(scope: &str) -> Result<Vec<&str>> {
    if scope.trim().is_empty() {
        return Err(CoordinatorError::invalid_scope("scope must not be empty"));
    }
    scope
        .split(',')
        .map(|s| {
            let s = s.trim();
            if s.is_empty() {
                Err(CoordinatorError::invalid_scope(format!(
                    "scope '{scope}' contains an empty element"
                )))
            } else {
                Ok(s)
            }
        })
        .collect()
}

/// Parse a nominal-time string, naming the offending text on failure.
pub(crate) fn parse_nominal_time(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, NOMINAL_TIME_FORMAT).map_err(|_| {
        CoordinatorError::invalid_scope(format!(
            "could not parse '{text}' as a UTC nominal time, expected format 2009-01-01T01:00Z"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_scope_trims_elements() {
        let elements = split_scope(" 1-5 , 8 ,10").unwrap();
        assert_eq!(elements, vec!["1-5", "8", "10"]);
    }

    #[test]
    fn test_split_scope_rejects_empty() {
        assert!(matches!(
            split_scope("   "),
            Err(CoordinatorError::InvalidScopeFormat { .. })
        ));
        assert!(matches!(
            split_scope("1, ,3"),
            Err(CoordinatorError::InvalidScopeFormat { .. })
        ));
    }

    #[test]
    fn test_parse_nominal_time() {
        let parsed = parse_nominal_time("2009-02-01T23:59Z").unwrap();
        assert_eq!(parsed.to_string(), "2009-02-01 23:59:00");
    }

    #[test]
    fn test_parse_nominal_time_names_bad_text() {
        let err = parse_nominal_time("2009-02-30").unwrap_err();
        assert!(err.to_string().contains("2009-02-30"));
    }

    #[test]
    fn test_scope_type_from_str() {
        assert_eq!("date".parse(), Ok(ScopeType::Date));
        assert_eq!("action".parse(), Ok(ScopeType::Action));
        assert!("job".parse::<ScopeType>().is_err());
    }
}
