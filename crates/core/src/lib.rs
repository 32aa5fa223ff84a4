//! Core domain logic for terratrack.
//!
//! This crate is the functional core of the project: pure types and
//! operations for crop care planning and planting tracking, plus the trait
//! boundaries (repositories, image store, notifier, identity provider) that
//! the application crate implements with real backends.
//!
//! Nothing in here performs I/O directly.

#[cfg(feature = "auth")]
pub mod auth;
pub mod media;
pub mod notify;
pub mod plan;
pub mod serde;
pub mod storage;
pub mod tracker;
