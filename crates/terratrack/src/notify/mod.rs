//! Notification delivery implementations.
//!
//! Concrete implementations of the `Notifier` trait from
//! `terratrack_core::notify`. The log notifier backs development and tests;
//! the `sns` feature enables delivery through an SNS topic.

#[cfg(any(not(feature = "sns"), test))]
mod log;

#[cfg(feature = "sns")]
mod sns;

#[cfg(any(not(feature = "sns"), test))]
pub use log::LogNotifier;

#[cfg(feature = "sns")]
pub use sns::SnsNotifier;
