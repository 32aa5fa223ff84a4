use thiserror::Error;

/// Validation errors for planting records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlantingError {
    #[error("crop name cannot be empty")]
    EmptyCropName,
    #[error("crop name too long (max {max} characters)")]
    CropNameTooLong { max: usize },
    #[error("notes too long (max {max} characters)")]
    NotesTooLong { max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_crop_name_display() {
        assert_eq!(
            PlantingError::EmptyCropName.to_string(),
            "crop name cannot be empty"
        );
    }

    #[test]
    fn test_crop_name_too_long_display() {
        let error = PlantingError::CropNameTooLong { max: 100 };
        assert_eq!(error.to_string(), "crop name too long (max 100 characters)");
    }

    #[test]
    fn test_notes_too_long_display() {
        let error = PlantingError::NotesTooLong { max: 2000 };
        assert_eq!(error.to_string(), "notes too long (max 2000 characters)");
    }
}
