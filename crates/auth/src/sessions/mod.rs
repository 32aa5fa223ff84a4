//! Session storage implementations.
//!
//! Sessions are short-lived and survive only for the life of the process;
//! the in-memory store is the single implementation.

mod inmemory;

pub use inmemory::SessionStore;
