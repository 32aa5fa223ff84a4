use serde::Deserialize;

/// Request payload for toggling harvest notifications.
#[derive(Debug, Deserialize)]
pub struct NotificationSettings {
    pub enabled: bool,
}
