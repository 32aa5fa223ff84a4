//! DynamoDB key generation functions.
//!
//! Pure functions for generating partition and sort keys following the
//! single-table design. All functions are sync and have no side effects.

use chrono::NaiveDate;
use uuid::Uuid;

pub const USER_PREFIX: &str = "USER#";
pub const PLANTING_PREFIX: &str = "PLANTING#";
pub const EMAIL_PREFIX: &str = "EMAIL#";
pub const PROVIDER_PREFIX: &str = "PROV#";

// ============================================================================
// User keys
// ============================================================================

/// Generate primary key for a User.
///
/// Pattern: `USER#<user_id>`
pub fn user_pk(user_id: Uuid) -> String {
    format!("{USER_PREFIX}{user_id}")
}

/// Generate sort key for a User.
///
/// Pattern: `USER#<user_id>` (same as PK for single-item queries)
pub fn user_sk(user_id: Uuid) -> String {
    format!("{USER_PREFIX}{user_id}")
}

/// Generate GSI2 partition key for User email lookup.
///
/// Pattern: `EMAIL#<email>`
pub fn user_gsi2_pk(email: &str) -> String {
    format!("{EMAIL_PREFIX}{email}")
}

/// Generate GSI2 sort key for User email lookup.
///
/// Pattern: `USER#<user_id>`
pub fn user_gsi2_sk(user_id: Uuid) -> String {
    format!("{USER_PREFIX}{user_id}")
}

/// Generate GSI3 partition key for User provider lookup.
///
/// Pattern: `PROV#<provider>#<provider_subject>`
pub fn user_gsi3_pk(provider: &str, provider_subject: &str) -> String {
    format!("{PROVIDER_PREFIX}{}#{}", provider, provider_subject)
}

/// Generate GSI3 sort key for User provider lookup.
///
/// Pattern: `USER#<user_id>`
pub fn user_gsi3_sk(user_id: Uuid) -> String {
    format!("{USER_PREFIX}{user_id}")
}

// ============================================================================
// Planting keys
// ============================================================================

/// Generate primary key for a Planting.
///
/// Pattern: `PLANTING#<planting_id>`
pub fn planting_pk(planting_id: Uuid) -> String {
    format!("{PLANTING_PREFIX}{planting_id}")
}

/// Generate sort key for a Planting.
///
/// Pattern: `PLANTING#<planting_id>` (same as PK for single-item queries)
pub fn planting_sk(planting_id: Uuid) -> String {
    format!("{PLANTING_PREFIX}{planting_id}")
}

/// Generate GSI1 partition key for Planting (user lookup).
///
/// Pattern: `USER#<user_id>`
pub fn planting_gsi1_pk(user_id: Uuid) -> String {
    format!("{USER_PREFIX}{user_id}")
}

/// Generate GSI1 sort key for Planting (date-sorted lookup).
///
/// Pattern: `PLANTING#<planting_date>#<planting_id>`
///
/// The planting date is in ISO 8601 format (YYYY-MM-DD) for lexicographic
/// sorting.
pub fn planting_gsi1_sk(planting_date: NaiveDate, planting_id: Uuid) -> String {
    format!(
        "{PLANTING_PREFIX}{}#{planting_id}",
        planting_date.format("%Y-%m-%d")
    )
}

/// Generate the GSI1SK prefix for querying all plantings of a user.
///
/// Pattern: `PLANTING#`
pub fn planting_gsi1_sk_prefix() -> &'static str {
    PLANTING_PREFIX
}
