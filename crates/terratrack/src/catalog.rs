//! Crop catalog loading.
//!
//! The catalog ships embedded in the binary; an operator can override it by
//! pointing `CATALOG_PATH` at a JSON file with the same shape.

use anyhow::Context;
use terratrack_core::plan::CropCatalog;

/// The catalog compiled into the binary.
const EMBEDDED_CATALOG: &str = include_str!("../catalog.json");

/// Loads the crop catalog, preferring the override path when given.
pub fn load_catalog(path: Option<&str>) -> anyhow::Result<CropCatalog> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog file: {path}"))?;
            let catalog = CropCatalog::from_json(&json)
                .with_context(|| format!("failed to parse catalog file: {path}"))?;
            tracing::info!(path, crops = catalog.crops.len(), "Loaded crop catalog");
            Ok(catalog)
        }
        None => {
            let catalog = CropCatalog::from_json(EMBEDDED_CATALOG)
                .context("embedded catalog is invalid")?;
            Ok(catalog)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = load_catalog(None).unwrap();
        assert!(!catalog.crops.is_empty());
    }

    #[test]
    fn test_embedded_catalog_has_common_crops() {
        let catalog = load_catalog(None).unwrap();
        assert!(catalog.find_crop("tomatoes").is_some());
        assert!(catalog.find_crop("Cucumbers").is_some());
    }

    #[test]
    fn test_missing_override_file_errors() {
        assert!(load_catalog(Some("/nonexistent/catalog.json")).is_err());
    }
}
