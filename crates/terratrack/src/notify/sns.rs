//! SNS-backed notifier.

use async_trait::async_trait;
use aws_sdk_sns::Client;

use terratrack_core::notify::{Notifier, NotifyError, Result};

/// Notifier that delivers through an SNS topic.
///
/// Email subscriptions use the `email` protocol, which requires the
/// recipient to confirm before messages are delivered. Published messages
/// fan out to every confirmed subscriber, so the body carries a trailer
/// naming the intended recipient.
pub struct SnsNotifier {
    client: Client,
    topic_arn: String,
}

impl SnsNotifier {
    /// Creates a new notifier with the given SNS client and topic ARN.
    pub fn new(client: Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }

    /// Creates a new notifier from environment configuration.
    ///
    /// Uses the AWS SDK default credential chain.
    pub async fn from_env(topic_arn: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);

        Self::new(client, topic_arn)
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn subscribe_email(&self, email: &str) -> Result<Option<String>> {
        let result = self
            .client
            .subscribe()
            .topic_arn(&self.topic_arn)
            .protocol("email")
            .endpoint(email)
            .send()
            .await
            .map_err(|e| NotifyError::Subscribe(e.to_string()))?;

        tracing::info!(email, "SNS email subscription requested");
        Ok(result.subscription_arn)
    }

    async fn send(&self, email: &str, subject: &str, message: &str) -> Result<Option<String>> {
        let body = format!("{message}\n\n---\nThis notification is for: {email}");

        let result = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(body)
            .send()
            .await
            .map_err(|e| NotifyError::Publish(e.to_string()))?;

        Ok(result.message_id)
    }
}
