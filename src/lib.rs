//! # Coordinator Core
//!
//! Scope resolution and filter-clause compilation for a coordinator-style
//! workflow scheduling engine. A coordinator job is a recurring scheduling
//! definition; each time it fires, an action identified by
//! `<job_id>@<action_number>` is materialized and tracked individually.
//!
//! This crate covers the two pure algorithms the engine's command layer
//! needs:
//!
//! - **Scope resolution** ([`scope::resolve_scope`]): turn a user-supplied,
//!   comma-separated scope expression (date ranges, single nominal times,
//!   action-number ranges, single numbers) into the deduplicated set of
//!   [`models::CoordinatorAction`] records it denotes, tolerating actions the
//!   store has not materialized yet.
//! - **Filter compilation** ([`query_builder::build_filter_clause`]): turn an
//!   ordered multi-valued filter specification into a parameterized clause
//!   fragment with a single monotonic placeholder sequence.
//!
//! Persistence is reached only through the narrow [`store::ActionStore`]
//! capability; [`store::postgres::PgActionStore`] is the SQLx-backed
//! production implementation. Query execution, transactions, scheduling
//! decisions, and the REST surface all live in the host engine.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coordinator_core::scope::{resolve_scope, ScopeType};
//! use coordinator_core::store::postgres::PgActionStore;
//! use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
//! let store = PgActionStore::new(pool);
//! let actions = resolve_scope(
//!     &store,
//!     ScopeType::Action,
//!     "0000001-260830-C",
//!     "1-5, 8",
//!     false,
//! )
//! .await?;
//! println!("scope selected {} actions", actions.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod query_builder;
pub mod scope;
pub mod store;

pub use config::CoordinatorConfig;
pub use error::{CoordinatorError, Result};
pub use models::{CoordinatorAction, CoordinatorActionStatus};
pub use query_builder::{build_filter_clause, FilterComparator, FilterSpec};
pub use scope::{resolve_scope, ScopeType};
pub use store::{ActionStore, StoreError};
