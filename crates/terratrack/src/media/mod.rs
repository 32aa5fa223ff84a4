//! Image storage implementations.
//!
//! Concrete implementations of the `ImageStore` trait from
//! `terratrack_core::media`. The in-memory store backs development and
//! tests; the `s3` feature enables the S3-backed store.

mod keys;

#[cfg(any(not(feature = "s3"), test))]
mod inmemory;

#[cfg(feature = "s3")]
mod s3;

#[cfg(any(not(feature = "s3"), test))]
pub use inmemory::InMemoryImageStore;

#[cfg(feature = "s3")]
pub use s3::S3ImageStore;
