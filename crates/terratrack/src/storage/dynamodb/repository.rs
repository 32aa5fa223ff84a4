//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `terratrack_core::storage` using
//! a single DynamoDB table.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

use terratrack_core::storage::{PlantingRepository, Result, UserRepository};
use terratrack_core::tracker::{Planting, User};

use super::conversions::{item_to_planting, item_to_user, planting_to_item, user_to_item};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
};
use super::keys;

/// DynamoDB-based repository implementation.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new repository from environment configuration.
    ///
    /// Uses the AWS SDK default credential chain.
    pub async fn from_env(table_name: impl Into<String>) -> Result<Self> {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);

        Ok(Self::new(client, table_name))
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

// ============================================================================
// PlantingRepository implementation
// ============================================================================

#[async_trait]
impl PlantingRepository for DynamoDbRepository {
    async fn get_planting(&self, id: Uuid) -> Result<Option<Planting>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::planting_pk(id)))
            .key("SK", AttributeValue::S(keys::planting_sk(id)))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, "Planting", id.to_string()))?;

        match result.item {
            Some(item) => Ok(Some(item_to_planting(&item)?)),
            None => Ok(None),
        }
    }

    async fn get_plantings_by_user(&self, user_id: Uuid) -> Result<Vec<Planting>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI1")
            .key_condition_expression("GSI1PK = :pk AND begins_with(GSI1SK, :sk_prefix)")
            .expression_attribute_values(
                ":pk",
                AttributeValue::S(keys::planting_gsi1_pk(user_id)),
            )
            .expression_attribute_values(
                ":sk_prefix",
                AttributeValue::S(keys::planting_gsi1_sk_prefix().to_string()),
            )
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_planting).collect()
    }

    async fn create_planting(&self, planting: &Planting) -> Result<()> {
        let item = planting_to_item(planting)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(PK)")
            .send()
            .await
            .map_err(|e| map_put_item_error(e, "Planting", planting.id.to_string(), true))?;

        Ok(())
    }

    async fn update_planting(&self, planting: &Planting) -> Result<()> {
        let item = planting_to_item(planting)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(PK)")
            .send()
            .await
            .map_err(|e| map_put_item_error(e, "Planting", planting.id.to_string(), false))?;

        Ok(())
    }

    async fn delete_planting(&self, id: Uuid) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::planting_pk(id)))
            .key("SK", AttributeValue::S(keys::planting_sk(id)))
            .condition_expression("attribute_exists(PK)")
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, "Planting", id.to_string()))?;

        Ok(())
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for DynamoDbRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::user_pk(id)))
            .key("SK", AttributeValue::S(keys::user_sk(id)))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, "User", id.to_string()))?;

        match result.item {
            Some(item) => Ok(Some(item_to_user(&item)?)),
            None => Ok(None),
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI2")
            .key_condition_expression("GSI2PK = :pk")
            .expression_attribute_values(":pk", AttributeValue::S(keys::user_gsi2_pk(email)))
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        match items.first() {
            Some(item) => Ok(Some(item_to_user(item)?)),
            None => Ok(None),
        }
    }

    async fn get_user_by_provider(
        &self,
        provider: &str,
        provider_subject: &str,
    ) -> Result<Option<User>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI3")
            .key_condition_expression("GSI3PK = :pk")
            .expression_attribute_values(
                ":pk",
                AttributeValue::S(keys::user_gsi3_pk(provider, provider_subject)),
            )
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        match items.first() {
            Some(item) => Ok(Some(item_to_user(item)?)),
            None => Ok(None),
        }
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let item = user_to_item(user);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(PK)")
            .send()
            .await
            .map_err(|e| map_put_item_error(e, "User", user.id.to_string(), true))?;

        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let item = user_to_item(user);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(PK)")
            .send()
            .await
            .map_err(|e| map_put_item_error(e, "User", user.id.to_string(), false))?;

        Ok(())
    }
}
