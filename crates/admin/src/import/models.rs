use std::path::Path;

use chrono::NaiveDate;
use school_storage::models::PointCategory;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Bulk load file: houses plus ledger entries that reference houses by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportDocument {
    #[serde(default)]
    pub houses: Vec<ImportHouse>,
    #[serde(default)]
    pub entries: Vec<ImportEntry>,
}

impl ImportDocument {
    pub async fn from_path(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportHouse {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportEntry {
    /// House name, matched case-insensitively
    pub house: String,
    pub category: PointCategory,
    pub points: i32,
    pub event_name: String,
    pub event_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Key used to match house names across the file and the database
pub fn house_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AdminError;

    #[test]
    fn test_from_json_fills_defaults() {
        let document = ImportDocument::from_json(
            r##"{
                "houses": [{ "name": "Tagore", "color": "#AA0000" }],
                "entries": [{
                    "house": "tagore",
                    "category": "sports",
                    "points": -5,
                    "event_name": "Late assembly",
                    "event_date": "2024-11-14"
                }]
            }"##,
        )
        .unwrap();

        assert!(document.houses[0].is_active);
        assert_eq!(document.houses[0].display_order, 0);
        assert_eq!(document.entries[0].category, PointCategory::Sports);
        assert_eq!(house_key(&document.entries[0].house), house_key(" Tagore "));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let result = ImportDocument::from_json(r#"{"houses": [{"name": "Tagore"}]}"#);
        assert!(matches!(result, Err(AdminError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_from_path_reports_missing_file() {
        let result = ImportDocument::from_path(Path::new("/nonexistent/houses.json")).await;
        assert!(matches!(result, Err(AdminError::IoError(_))));
    }
}
