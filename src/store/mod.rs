//! # Action Store Capability
//!
//! The narrow lookup seam between the resolution core and the persistence
//! layer. Resolution logic only ever sees this trait, so it can be exercised
//! against an in-memory store in tests; [`postgres`] provides the production
//! implementation.
//!
//! "Not found" is part of the contract, not an error: lookups return
//! `Ok(None)` for a missing action and reserve `Err` for real store failures.
//! Callers decide per call site whether a miss is expected (an action not yet
//! materialized) or a defect.

pub mod postgres;

use crate::models::CoordinatorAction;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Failures originating in the persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row carried a status string the model does not recognize.
    #[error("corrupt action row {id}: {message}")]
    CorruptRow { id: String, message: String },
}

/// Read-only lookup capability over materialized coordinator actions.
///
/// Implementations are synchronous from the caller's point of view aside from
/// awaiting I/O; no retry or timeout policy lives behind this trait.
#[async_trait]
pub trait ActionStore: Send + Sync {
    /// Look up one action by its `<job_id>@<n>` identifier.
    async fn find_by_id(&self, action_id: &str) -> Result<Option<CoordinatorAction>, StoreError>;

    /// Look up the action of a job materialized for an exact nominal time.
    async fn find_by_nominal_time(
        &self,
        job_id: &str,
        nominal_time: NaiveDateTime,
    ) -> Result<Option<CoordinatorAction>, StoreError>;

    /// All actions of a job whose nominal time falls within `[start, end]`.
    /// With `active_only`, actions in a terminal status are excluded.
    async fn find_in_date_range(
        &self,
        job_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        active_only: bool,
    ) -> Result<Vec<CoordinatorAction>, StoreError>;
}
