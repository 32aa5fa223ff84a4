//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! domain types. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use terratrack_core::plan::PlanTask;
use terratrack_core::storage::RepositoryError;
use terratrack_core::tracker::{Planting, User};

use super::keys;

pub const ENTITY_TYPE_USER: &str = "USER";
pub const ENTITY_TYPE_PLANTING: &str = "PLANTING";

// ============================================================================
// User conversions
// ============================================================================

/// Convert a User to DynamoDB item.
pub fn user_to_item(user: &User) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert("PK".to_string(), AttributeValue::S(keys::user_pk(user.id)));
    item.insert("SK".to_string(), AttributeValue::S(keys::user_sk(user.id)));
    item.insert(
        "GSI2PK".to_string(),
        AttributeValue::S(keys::user_gsi2_pk(&user.email)),
    );
    item.insert(
        "GSI2SK".to_string(),
        AttributeValue::S(keys::user_gsi2_sk(user.id)),
    );
    if let (Some(provider), Some(subject)) = (&user.provider, &user.provider_subject) {
        item.insert(
            "GSI3PK".to_string(),
            AttributeValue::S(keys::user_gsi3_pk(provider, subject)),
        );
        item.insert(
            "GSI3SK".to_string(),
            AttributeValue::S(keys::user_gsi3_sk(user.id)),
        );
    }

    // Entity type
    item.insert(
        "entityType".to_string(),
        AttributeValue::S(ENTITY_TYPE_USER.to_string()),
    );

    // Data
    item.insert("id".to_string(), AttributeValue::S(user.id.to_string()));
    item.insert("name".to_string(), AttributeValue::S(user.name.clone()));
    item.insert("email".to_string(), AttributeValue::S(user.email.clone()));
    if let Some(provider) = &user.provider {
        item.insert("provider".to_string(), AttributeValue::S(provider.clone()));
    }
    if let Some(subject) = &user.provider_subject {
        item.insert(
            "providerSubject".to_string(),
            AttributeValue::S(subject.clone()),
        );
    }
    item.insert(
        "notificationsEnabled".to_string(),
        AttributeValue::Bool(user.notifications_enabled),
    );
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(user.created_at.to_rfc3339()),
    );
    item.insert(
        "updatedAt".to_string(),
        AttributeValue::S(user.updated_at.to_rfc3339()),
    );

    item
}

/// Convert a DynamoDB item to User.
pub fn item_to_user(item: &HashMap<String, AttributeValue>) -> Result<User, RepositoryError> {
    Ok(User {
        id: get_uuid(item, "id")?,
        name: get_string(item, "name")?,
        email: get_string(item, "email")?,
        provider: get_optional_string(item, "provider"),
        provider_subject: get_optional_string(item, "providerSubject"),
        notifications_enabled: get_bool(item, "notificationsEnabled").unwrap_or(true),
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

// ============================================================================
// Planting conversions
// ============================================================================

/// Convert a Planting to DynamoDB item.
pub fn planting_to_item(
    planting: &Planting,
) -> Result<HashMap<String, AttributeValue>, RepositoryError> {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        "PK".to_string(),
        AttributeValue::S(keys::planting_pk(planting.id)),
    );
    item.insert(
        "SK".to_string(),
        AttributeValue::S(keys::planting_sk(planting.id)),
    );
    item.insert(
        "GSI1PK".to_string(),
        AttributeValue::S(keys::planting_gsi1_pk(planting.user_id)),
    );
    item.insert(
        "GSI1SK".to_string(),
        AttributeValue::S(keys::planting_gsi1_sk(planting.planting_date, planting.id)),
    );

    // Entity type
    item.insert(
        "entityType".to_string(),
        AttributeValue::S(ENTITY_TYPE_PLANTING.to_string()),
    );

    // Data
    item.insert("id".to_string(), AttributeValue::S(planting.id.to_string()));
    item.insert(
        "userId".to_string(),
        AttributeValue::S(planting.user_id.to_string()),
    );
    item.insert(
        "cropName".to_string(),
        AttributeValue::S(planting.crop_name.clone()),
    );
    item.insert(
        "plantingDate".to_string(),
        AttributeValue::S(planting.planting_date.format("%Y-%m-%d").to_string()),
    );
    item.insert(
        "batchId".to_string(),
        AttributeValue::S(planting.batch_id.clone()),
    );
    if let Some(notes) = &planting.notes {
        item.insert("notes".to_string(), AttributeValue::S(notes.clone()));
    }
    if let Some(image_url) = &planting.image_url {
        item.insert("imageUrl".to_string(), AttributeValue::S(image_url.clone()));
    }

    // Care plan as JSON
    let plan_json = serde_json::to_string(&planting.plan)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    item.insert("plan".to_string(), AttributeValue::S(plan_json));

    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(planting.created_at.to_rfc3339()),
    );
    item.insert(
        "updatedAt".to_string(),
        AttributeValue::S(planting.updated_at.to_rfc3339()),
    );

    Ok(item)
}

/// Convert a DynamoDB item to Planting.
pub fn item_to_planting(
    item: &HashMap<String, AttributeValue>,
) -> Result<Planting, RepositoryError> {
    let plan_json = get_string(item, "plan")?;
    let plan: Vec<PlanTask> = serde_json::from_str(&plan_json)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    Ok(Planting {
        id: get_uuid(item, "id")?,
        user_id: get_uuid(item, "userId")?,
        crop_name: get_string(item, "cropName")?,
        planting_date: get_date(item, "plantingDate")?,
        batch_id: get_string(item, "batchId")?,
        notes: get_optional_string(item, "notes"),
        image_url: get_optional_string(item, "imageUrl"),
        plan,
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get an optional boolean attribute.
fn get_bool(item: &HashMap<String, AttributeValue>, key: &str) -> Option<bool> {
    item.get(key).and_then(|v| v.as_bool().ok()).copied()
}

/// Get a required UUID attribute.
fn get_uuid(item: &HashMap<String, AttributeValue>, key: &str) -> Result<Uuid, RepositoryError> {
    let s = get_string(item, key)?;
    Uuid::parse_str(&s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid UUID {}: {}", key, e)))
}

/// Get a required date attribute (YYYY-MM-DD format).
fn get_date(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<NaiveDate, RepositoryError> {
    let s = get_string(item, key)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid date {}: {}", key, e)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap(),
            name: "Dana Fields".to_string(),
            email: "dana@example.com".to_string(),
            provider: Some("cognito".to_string()),
            provider_subject: Some("sub-123456".to_string()),
            notifications_enabled: true,
            created_at: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    fn sample_planting() -> Planting {
        Planting {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap(),
            user_id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap(),
            crop_name: "Tomatoes".to_string(),
            planting_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            batch_id: "batch-20240501".to_string(),
            notes: Some("Raised bed 3".to_string()),
            image_url: None,
            plan: vec![PlanTask::new(
                "Water seedlings",
                NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            )],
            created_at: DateTime::parse_from_rfc3339("2024-05-01T08:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339("2024-05-01T08:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn test_user_round_trip() {
        let user = sample_user();
        let item = user_to_item(&user);
        let parsed = item_to_user(&item).unwrap();

        assert_eq!(user.id, parsed.id);
        assert_eq!(user.name, parsed.name);
        assert_eq!(user.email, parsed.email);
        assert_eq!(user.provider, parsed.provider);
        assert_eq!(user.provider_subject, parsed.provider_subject);
        assert!(parsed.notifications_enabled);
    }

    #[test]
    fn test_user_item_has_correct_keys() {
        let user = sample_user();
        let item = user_to_item(&user);

        assert_eq!(
            item.get("PK").unwrap().as_s().unwrap(),
            "USER#550e8400-e29b-41d4-a716-446655440001"
        );
        assert_eq!(
            item.get("GSI2PK").unwrap().as_s().unwrap(),
            "EMAIL#dana@example.com"
        );
        assert_eq!(
            item.get("GSI3PK").unwrap().as_s().unwrap(),
            "PROV#cognito#sub-123456"
        );
        assert_eq!(item.get("entityType").unwrap().as_s().unwrap(), "USER");
    }

    #[test]
    fn test_user_without_provider_omits_gsi3() {
        let mut user = sample_user();
        user.provider = None;
        user.provider_subject = None;

        let item = user_to_item(&user);
        assert!(!item.contains_key("GSI3PK"));
        assert!(!item.contains_key("GSI3SK"));
    }

    #[test]
    fn test_user_missing_notifications_flag_defaults_on() {
        let user = sample_user();
        let mut item = user_to_item(&user);
        item.remove("notificationsEnabled");

        let parsed = item_to_user(&item).unwrap();
        assert!(parsed.notifications_enabled);
    }

    #[test]
    fn test_planting_round_trip() {
        let planting = sample_planting();
        let item = planting_to_item(&planting).unwrap();
        let parsed = item_to_planting(&item).unwrap();

        assert_eq!(planting.id, parsed.id);
        assert_eq!(planting.user_id, parsed.user_id);
        assert_eq!(planting.crop_name, parsed.crop_name);
        assert_eq!(planting.planting_date, parsed.planting_date);
        assert_eq!(planting.batch_id, parsed.batch_id);
        assert_eq!(planting.notes, parsed.notes);
        assert_eq!(planting.plan, parsed.plan);
    }

    #[test]
    fn test_planting_item_has_correct_gsi1_keys() {
        let planting = sample_planting();
        let item = planting_to_item(&planting).unwrap();

        assert_eq!(
            item.get("GSI1PK").unwrap().as_s().unwrap(),
            "USER#550e8400-e29b-41d4-a716-446655440001"
        );
        assert!(item
            .get("GSI1SK")
            .unwrap()
            .as_s()
            .unwrap()
            .starts_with("PLANTING#2024-05-01#"));
        assert_eq!(item.get("entityType").unwrap().as_s().unwrap(), "PLANTING");
    }

    #[test]
    fn test_get_string_missing_field() {
        let item = HashMap::new();
        assert!(get_string(&item, "missing").is_err());
    }

    #[test]
    fn test_get_optional_string() {
        let mut item = HashMap::new();
        assert!(get_optional_string(&item, "missing").is_none());

        item.insert(
            "present".to_string(),
            AttributeValue::S("value".to_string()),
        );
        assert_eq!(
            get_optional_string(&item, "present"),
            Some("value".to_string())
        );
    }
}
