//! # Coordinator Action Model
//!
//! One materialized, individually trackable execution instance of a coordinator
//! job. A coordinator job is a recurring scheduling definition; each time it
//! fires, an action is materialized and identified by `<job_id>@<n>` where `n`
//! is the action's sequence number within the job.
//!
//! ## Database Schema
//!
//! Maps to the `coord_actions` table:
//! - `id`: `<job_id>@<n>` identifier (VARCHAR, primary key)
//! - `job_id`: owning coordinator job (VARCHAR, indexed)
//! - `action_number`: sequence number within the job (INTEGER)
//! - `status`: lifecycle status string (VARCHAR)
//! - `nominal_time`: the logical scheduled timestamp the action corresponds
//!   to, independent of actual execution time (TIMESTAMP, UTC)

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A status string with no matching [`CoordinatorActionStatus`] variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown coordinator action status: {0}")]
pub struct ParseStatusError(String);

/// Lifecycle status of a coordinator action.
///
/// Terminal statuses mark actions that will never run again; "active" queries
/// exclude them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoordinatorActionStatus {
    Waiting,
    Ready,
    Submitted,
    Running,
    Suspended,
    #[serde(rename = "TIMEDOUT")]
    TimedOut,
    Succeeded,
    Killed,
    Failed,
    Ignored,
}

impl CoordinatorActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinatorActionStatus::Waiting => "WAITING",
            CoordinatorActionStatus::Ready => "READY",
            CoordinatorActionStatus::Submitted => "SUBMITTED",
            CoordinatorActionStatus::Running => "RUNNING",
            CoordinatorActionStatus::Suspended => "SUSPENDED",
            CoordinatorActionStatus::TimedOut => "TIMEDOUT",
            CoordinatorActionStatus::Succeeded => "SUCCEEDED",
            CoordinatorActionStatus::Killed => "KILLED",
            CoordinatorActionStatus::Failed => "FAILED",
            CoordinatorActionStatus::Ignored => "IGNORED",
        }
    }

    /// Whether the action has reached a state it will never leave.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CoordinatorActionStatus::Succeeded
                | CoordinatorActionStatus::Killed
                | CoordinatorActionStatus::Failed
                | CoordinatorActionStatus::Ignored
        )
    }

    /// Status names excluded by active-only queries.
    pub fn terminal_names() -> &'static [&'static str] {
        &["SUCCEEDED", "KILLED", "FAILED", "IGNORED"]
    }
}

impl fmt::Display for CoordinatorActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoordinatorActionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(CoordinatorActionStatus::Waiting),
            "READY" => Ok(CoordinatorActionStatus::Ready),
            "SUBMITTED" => Ok(CoordinatorActionStatus::Submitted),
            "RUNNING" => Ok(CoordinatorActionStatus::Running),
            "SUSPENDED" => Ok(CoordinatorActionStatus::Suspended),
            "TIMEDOUT" => Ok(CoordinatorActionStatus::TimedOut),
            "SUCCEEDED" => Ok(CoordinatorActionStatus::Succeeded),
            "KILLED" => Ok(CoordinatorActionStatus::Killed),
            "FAILED" => Ok(CoordinatorActionStatus::Failed),
            "IGNORED" => Ok(CoordinatorActionStatus::Ignored),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A materialized coordinator action record.
///
/// Owned by the persistence layer; this crate reads it through the
/// [`ActionStore`](crate::store::ActionStore) capability and never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CoordinatorAction {
    pub id: String,
    pub job_id: String,
    pub action_number: i32,
    #[sqlx(try_from = "String")]
    pub status: CoordinatorActionStatus,
    pub nominal_time: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<String> for CoordinatorActionStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl CoordinatorAction {
    /// Build the `<job_id>@<n>` identifier for an action of the given job.
    pub fn action_id(job_id: &str, action_number: i32) -> String {
        format!("{job_id}@{action_number}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            CoordinatorActionStatus::Waiting,
            CoordinatorActionStatus::Ready,
            CoordinatorActionStatus::Submitted,
            CoordinatorActionStatus::Running,
            CoordinatorActionStatus::Suspended,
            CoordinatorActionStatus::TimedOut,
            CoordinatorActionStatus::Succeeded,
            CoordinatorActionStatus::Killed,
            CoordinatorActionStatus::Failed,
            CoordinatorActionStatus::Ignored,
        ] {
            assert_eq!(status.as_str().parse(), Ok(status));
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(CoordinatorActionStatus::Succeeded.is_terminal());
        assert!(CoordinatorActionStatus::Killed.is_terminal());
        assert!(CoordinatorActionStatus::Failed.is_terminal());
        assert!(CoordinatorActionStatus::Ignored.is_terminal());
        assert!(!CoordinatorActionStatus::Running.is_terminal());
        assert!(!CoordinatorActionStatus::Waiting.is_terminal());
    }

    #[test]
    fn test_action_id_format() {
        assert_eq!(
            CoordinatorAction::action_id("0000001-260830-C", 4),
            "0000001-260830-C@4"
        );
    }
}
