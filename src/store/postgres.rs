//! PostgreSQL-backed [`ActionStore`] over the `coord_actions` table.
//!
//! All queries use bind parameters; the dynamic active-status filter is built
//! with SQLx's `QueryBuilder` so status names are bound, not interpolated.

use super::{ActionStore, StoreError};
use crate::models::{CoordinatorAction, CoordinatorActionStatus};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, QueryBuilder};

const ACTION_COLUMNS: &str =
    "id, job_id, action_number, status, nominal_time, created_at, updated_at";

/// Production action store backed by a SQLx connection pool.
///
/// Pool sizing, timeouts, and retry policy belong to the pool configuration,
/// not to this type.
#[derive(Debug, Clone)]
pub struct PgActionStore {
    pool: PgPool,
}

impl PgActionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActionStore for PgActionStore {
    async fn find_by_id(&self, action_id: &str) -> Result<Option<CoordinatorAction>, StoreError> {
        let action = sqlx::query_as::<_, CoordinatorAction>(&format!(
            "SELECT {ACTION_COLUMNS} FROM coord_actions WHERE id = $1"
        ))
        .bind(action_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(action)
    }

    async fn find_by_nominal_time(
        &self,
        job_id: &str,
        nominal_time: NaiveDateTime,
    ) -> Result<Option<CoordinatorAction>, StoreError> {
        let action = sqlx::query_as::<_, CoordinatorAction>(&format!(
            "SELECT {ACTION_COLUMNS} FROM coord_actions WHERE job_id = $1 AND nominal_time = $2"
        ))
        .bind(job_id)
        .bind(nominal_time)
        .fetch_optional(&self.pool)
        .await?;
        Ok(action)
    }

    async fn find_in_date_range(
        &self,
        job_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        active_only: bool,
    ) -> Result<Vec<CoordinatorAction>, StoreError> {
        let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "SELECT {ACTION_COLUMNS} FROM coord_actions WHERE job_id = "
        ));
        query.push_bind(job_id);
        query.push(" AND nominal_time >= ");
        query.push_bind(start);
        query.push(" AND nominal_time <= ");
        query.push_bind(end);

        if active_only {
            query.push(" AND status NOT IN (");
            let mut separated = query.separated(", ");
            for status in CoordinatorActionStatus::terminal_names() {
                separated.push_bind(*status);
            }
            query.push(")");
        }

        let actions = query
            .build_query_as::<CoordinatorAction>()
            .fetch_all(&self.pool)
            .await?;
        Ok(actions)
    }
}
