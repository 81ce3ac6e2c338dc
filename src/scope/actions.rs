//! Action-id-route resolution: action-number ranges and single numbers.

use super::{split_scope, ScopeToken, DATE_RANGE_SEPARATOR};
use crate::error::{CoordinatorError, Result};
use crate::models::CoordinatorAction;
use crate::store::ActionStore;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Classify one element of an action scope, parsing and validating the
/// numbers eagerly.
pub(crate) fn classify_action_token(element: &str) -> Result<ScopeToken> {
    // A date-range separator has no meaning on this route.
    if element.contains(DATE_RANGE_SEPARATOR) {
        return Err(CoordinatorError::invalid_scope(format!(
            "action scope element '{element}' must not contain '::'"
        )));
    }
    if element.contains('-') {
        let range: Vec<&str> = element.split('-').collect();
        if range.len() != 2 {
            return Err(CoordinatorError::invalid_scope(format!(
                "format is wrong for action range '{element}', an example of correct format is 1-5"
            )));
        }
        let start = parse_action_number(range[0].trim())?;
        let end = parse_action_number(range[1].trim())?;
        if start > end {
            return Err(CoordinatorError::invalid_scope(format!(
                "format is wrong for action range '{element}', starting action number must not be \
                 greater than ending action number"
            )));
        }
        Ok(ScopeToken::IdRange { start, end })
    } else {
        Ok(ScopeToken::SingleId {
            n: parse_action_number(element)?,
        })
    }
}

fn parse_action_number(text: &str) -> Result<i32> {
    text.parse().map_err(|_| {
        CoordinatorError::invalid_scope(format!("could not parse '{text}' as an action number"))
    })
}

/// Expand an action scope into the set of `<job_id>@<n>` identifiers it
/// denotes. Duplicate numbers across elements collapse here.
pub(crate) fn collect_action_ids(job_id: &str, scope: &str) -> Result<HashSet<String>> {
    let mut ids = HashSet::new();
    for element in split_scope(scope)? {
        match classify_action_token(element)? {
            ScopeToken::IdRange { start, end } => {
                for n in start..=end {
                    ids.insert(CoordinatorAction::action_id(job_id, n));
                }
            }
            ScopeToken::SingleId { n } => {
                ids.insert(CoordinatorAction::action_id(job_id, n));
            }
            ScopeToken::DateRange { .. } | ScopeToken::SingleDate { .. } => unreachable!(),
        }
    }
    Ok(ids)
}

/// Resolve an action scope into the actions the store holds for it.
///
/// An identifier the store reports as absent names an action that has not
/// been materialized yet; it is skipped with a warning rather than failing
/// the call. Any other lookup failure aborts. Result order follows set
/// iteration and is not significant.
pub(crate) async fn resolve_action_scope(
    store: &dyn ActionStore,
    job_id: &str,
    scope: &str,
) -> Result<Vec<CoordinatorAction>> {
    let ids = collect_action_ids(job_id, scope)?;

    let mut actions = Vec::with_capacity(ids.len());
    for id in &ids {
        match store.find_by_id(id).await? {
            Some(action) => actions.push(action),
            None => {
                warn!(
                    action_id = id.as_str(),
                    "action not yet materialized, skipping"
                );
            }
        }
    }

    debug!(
        job_id = job_id,
        scope = scope,
        requested = ids.len(),
        resolved = actions.len(),
        "resolved action scope"
    );
    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_token_expands_inclusively() {
        let ids = collect_action_ids("job-1", "2-4").unwrap();
        let expected: HashSet<String> = ["job-1@2", "job-1@3", "job-1@4"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_duplicate_elements_collapse() {
        let ids = collect_action_ids("job-1", "1-3, 2, 3").unwrap();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_single_element_must_be_integer() {
        let err = collect_action_ids("job-1", "abc").unwrap_err();
        assert!(matches!(err, CoordinatorError::InvalidScopeFormat { .. }));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = collect_action_ids("job-1", "5-1").unwrap_err();
        assert!(matches!(err, CoordinatorError::InvalidScopeFormat { .. }));
    }

    #[test]
    fn test_range_must_have_exactly_two_parts() {
        assert!(collect_action_ids("job-1", "1--5").is_err());
        assert!(collect_action_ids("job-1", "1-2-3").is_err());
    }

    #[test]
    fn test_date_separator_rejected_on_action_route() {
        let err = collect_action_ids("job-1", "1::5").unwrap_err();
        assert!(matches!(err, CoordinatorError::InvalidScopeFormat { .. }));
    }
}
