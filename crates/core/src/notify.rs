//! Notification abstraction and message composition.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while sending notifications.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("subscribe failed: {0}")]
    Subscribe(String),
    #[error("publish failed: {0}")]
    Publish(String),
}

/// Result type for notification operations.
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Delivery channel for user notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Subscribes an email address to the notification topic.
    /// Returns the subscription identifier when the backend provides one.
    async fn subscribe_email(&self, email: &str) -> Result<Option<String>>;

    /// Sends a notification addressed to the given email.
    /// Returns the message identifier when the backend provides one.
    async fn send(&self, email: &str, subject: &str, message: &str) -> Result<Option<String>>;
}

/// Composes the harvest reminder for a planting. Returns (subject, body).
pub fn harvest_reminder(
    crop_name: &str,
    planting_date: NaiveDate,
    due_date: NaiveDate,
) -> (String, String) {
    let subject = format!("Harvest Reminder: {crop_name} needs attention");
    let body = format!(
        "Hello!\n\n\
         This is a reminder that your {crop_name} planting needs attention.\n\n\
         Planting Date: {planting_date}\n\
         Due Date: {due_date}\n\n\
         Remember to check your planting care plan for all scheduled tasks.\n\n\
         Happy harvesting!\n\
         - TerraTrack Team\n"
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_harvest_reminder_subject_names_crop() {
        let (subject, _) = harvest_reminder("Cucumbers", date(2025, 4, 1), date(2025, 5, 26));
        assert_eq!(subject, "Harvest Reminder: Cucumbers needs attention");
    }

    #[test]
    fn test_harvest_reminder_body_contains_dates() {
        let (_, body) = harvest_reminder("Cucumbers", date(2025, 4, 1), date(2025, 5, 26));
        assert!(body.contains("Planting Date: 2025-04-01"));
        assert!(body.contains("Due Date: 2025-05-26"));
        assert!(body.ends_with("- TerraTrack Team\n"));
    }
}
