//! Date-route resolution: date ranges and single nominal times.

use super::{parse_nominal_time, split_scope, ScopeToken, DATE_RANGE_SEPARATOR};
use crate::error::{CoordinatorError, Result};
use crate::models::CoordinatorAction;
use crate::store::ActionStore;
use std::collections::HashMap;
use tracing::debug;

/// Classify one element of a date scope. Infallible: the element either
/// carries the range separator or is treated as a single nominal time, and
/// date text is validated later where the parse error can name it.
pub(crate) fn classify_date_token(element: &str) -> ScopeToken {
    match element.split_once(DATE_RANGE_SEPARATOR) {
        Some((start, end)) => ScopeToken::DateRange {
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        },
        None => ScopeToken::SingleDate {
            date: element.to_string(),
        },
    }
}

/// Resolve a date scope into the deduplicated union of the actions each
/// element denotes.
///
/// A single nominal time that parses but has no materialized action is a
/// [`CoordinatorError::InternalInconsistency`]: nominal times are derived from
/// the job's own materialization history, so a miss means a bug elsewhere,
/// not bad user input.
pub(crate) async fn resolve_date_scope(
    store: &dyn ActionStore,
    job_id: &str,
    scope: &str,
    active_only: bool,
) -> Result<Vec<CoordinatorAction>> {
    // Keyed by action id: overlapping ranges yield each record once.
    let mut collected: HashMap<String, CoordinatorAction> = HashMap::new();

    for element in split_scope(scope)? {
        match classify_date_token(element) {
            ScopeToken::DateRange { start, end } => {
                let start = parse_nominal_time(&start)?;
                let end = parse_nominal_time(&end)?;
                if start > end {
                    return Err(CoordinatorError::invalid_scope(format!(
                        "date range '{element}' is inverted, start date must not be after end date"
                    )));
                }
                let actions = store
                    .find_in_date_range(job_id, start, end, active_only)
                    .await?;
                for action in actions {
                    collected.insert(action.id.clone(), action);
                }
            }
            ScopeToken::SingleDate { date } => {
                let nominal_time = parse_nominal_time(&date)?;
                match store.find_by_nominal_time(job_id, nominal_time).await? {
                    Some(action) => {
                        collected.insert(action.id.clone(), action);
                    }
                    None => {
                        return Err(CoordinatorError::InternalInconsistency {
                            message: format!(
                                "no action of job {job_id} materialized for nominal time {date}"
                            ),
                        });
                    }
                }
            }
            // Id tokens are never produced on the date route.
            ScopeToken::IdRange { .. } | ScopeToken::SingleId { .. } => unreachable!(),
        }
    }

    debug!(
        job_id = job_id,
        scope = scope,
        resolved = collected.len(),
        "resolved date scope"
    );
    Ok(collected.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_range_token() {
        assert_eq!(
            classify_date_token("2009-02-01T00:00Z:: 2009-02-02T00:00Z"),
            ScopeToken::DateRange {
                start: "2009-02-01T00:00Z".to_string(),
                end: "2009-02-02T00:00Z".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_single_date_token() {
        assert_eq!(
            classify_date_token("2009-02-01T00:00Z"),
            ScopeToken::SingleDate {
                date: "2009-02-01T00:00Z".to_string(),
            }
        );
    }
}
