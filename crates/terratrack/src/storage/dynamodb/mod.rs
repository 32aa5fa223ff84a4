//! DynamoDB storage backend implementation.
//!
//! Single-table design with plantings keyed under their owning user via GSI1
//! and users addressable by email (GSI2) and identity provider subject (GSI3).

mod conversions;
mod error;
mod keys;
mod repository;

pub use repository::DynamoDbRepository;
