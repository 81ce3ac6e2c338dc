//! # Models
//!
//! Data layer for coordinator entities. This crate only reads action records;
//! creation and lifecycle transitions belong to the scheduling engine.

pub mod coordinator_action;

pub use coordinator_action::{CoordinatorAction, CoordinatorActionStatus, ParseStatusError};
