use thiserror::Error;

/// Errors that can occur while working with care plans.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("unknown crop: {0}")]
    UnknownCrop(String),
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_crop_display() {
        let error = PlanError::UnknownCrop("Dragonfruit".to_string());
        assert_eq!(error.to_string(), "unknown crop: Dragonfruit");
    }

    #[test]
    fn test_invalid_catalog_display() {
        let error = PlanError::InvalidCatalog("missing field `plants`".to_string());
        assert_eq!(error.to_string(), "invalid catalog: missing field `plants`");
    }
}
