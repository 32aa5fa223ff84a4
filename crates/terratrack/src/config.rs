use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table name (default: "terratrack")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub table_name: String,
    /// S3 bucket for planting images (default: "terratrack-media")
    /// Note: Only used when the `s3` feature is enabled.
    #[allow(dead_code)]
    pub media_bucket: String,
    /// SNS topic ARN for harvest notifications (default: empty)
    /// Note: Only used when the `sns` feature is enabled.
    #[allow(dead_code)]
    pub sns_topic_arn: String,
    /// Optional path to a crop catalog file overriding the embedded one.
    pub catalog_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - DynamoDB table name (default: "terratrack")
    /// - `MEDIA_BUCKET` - S3 bucket for planting images (default: "terratrack-media")
    /// - `SNS_TOPIC_ARN` - SNS topic for harvest notifications (default: empty)
    /// - `CATALOG_PATH` - Crop catalog JSON file overriding the embedded catalog
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("DYNAMODB_TABLE_NAME")
                .unwrap_or_else(|_| "terratrack".to_string()),
            media_bucket: env::var("MEDIA_BUCKET")
                .unwrap_or_else(|_| "terratrack-media".to_string()),
            sns_topic_arn: env::var("SNS_TOPIC_ARN").unwrap_or_default(),
            catalog_path: env::var("CATALOG_PATH").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        env::remove_var("DYNAMODB_TABLE_NAME");
        env::remove_var("MEDIA_BUCKET");
        env::remove_var("SNS_TOPIC_ARN");
        env::remove_var("CATALOG_PATH");

        let config = Config::from_env();

        assert_eq!(config.table_name, "terratrack");
        assert_eq!(config.media_bucket, "terratrack-media");
        assert_eq!(config.sns_topic_arn, "");
        assert!(config.catalog_path.is_none());
    }
}
