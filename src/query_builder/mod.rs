//! # Query Builder
//!
//! Compilation of structured filter specifications into parameterized SQL
//! fragments. The fragments are consumed by the query layer; nothing here
//! executes against a database.

pub mod filter;

pub use filter::{build_filter_clause, FilterComparator, FilterSpec};
