//! Log-only notifier.

use async_trait::async_trait;

use terratrack_core::notify::{Notifier, Result};

/// Notifier that writes messages to the tracing log instead of delivering
/// them. Used when no notification backend is configured.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn subscribe_email(&self, email: &str) -> Result<Option<String>> {
        tracing::info!(email, "Notification subscription requested (log only)");
        Ok(None)
    }

    async fn send(&self, email: &str, subject: &str, message: &str) -> Result<Option<String>> {
        tracing::info!(email, subject, message, "Notification (log only)");
        Ok(None)
    }
}
