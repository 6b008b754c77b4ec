use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::common::{PaginationParams, default_page, default_page_size};
use super::house::validate_not_blank;
use crate::models::PointCategory;

pub const MAX_POINTS_PER_ENTRY: i32 = 10_000;

/// Request payload for awarding (or, with a negative value, deducting) house points
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AwardPointsRequest {
    pub house_id: Uuid,

    pub category: PointCategory,

    /// Negative values are deductions. Zero is accepted.
    #[validate(custom(function = "validate_points"))]
    pub points: i32,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Event name must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub event_name: String,

    pub event_date: NaiveDate,

    #[validate(length(max = 1000))]
    pub remarks: Option<String>,
}

pub fn validate_points(points: i32) -> Result<(), ValidationError> {
    if points.unsigned_abs() > MAX_POINTS_PER_ENTRY.unsigned_abs() {
        let mut error = ValidationError::new("range");
        error.message = Some(
            format!(
                "Points must be between -{0} and {0}",
                MAX_POINTS_PER_ENTRY
            )
            .into(),
        );
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PointEntryFilter {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// House slug
    pub house: Option<String>,
    pub category: Option<PointCategory>,
    /// Academic year such as `2024-2025`
    pub academic_year: Option<String>,
}

impl Default for PointEntryFilter {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            house: None,
            category: None,
            academic_year: None,
        }
    }
}

impl PointEntryFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.page_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HouseSummary {
    pub house_id: Uuid,
    pub name: String,
    pub slug: String,
    pub color: String,
}

/// A ledger entry together with the house it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PointEntryResponse {
    pub entry_id: Uuid,
    pub house: HouseSummary,
    pub category: PointCategory,
    pub points: i32,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub remarks: Option<String>,
    pub awarded_by: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, FromRow)]
pub(crate) struct PointEntryRow {
    pub entry_id: Uuid,
    pub house_id: Uuid,
    pub house_name: String,
    pub house_slug: String,
    pub house_color: String,
    pub category: PointCategory,
    pub points: i32,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub remarks: Option<String>,
    pub awarded_by: String,
    pub created_at: NaiveDateTime,
}

impl From<PointEntryRow> for PointEntryResponse {
    fn from(row: PointEntryRow) -> Self {
        Self {
            entry_id: row.entry_id,
            house: HouseSummary {
                house_id: row.house_id,
                name: row.house_name,
                slug: row.house_slug,
                color: row.house_color,
            },
            category: row.category,
            points: row.points,
            event_name: row.event_name,
            event_date: row.event_date,
            remarks: row.remarks,
            awarded_by: row.awarded_by,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn award(points: i32, event_name: &str) -> AwardPointsRequest {
        AwardPointsRequest {
            house_id: Uuid::new_v4(),
            category: PointCategory::Sports,
            points,
            event_name: event_name.to_string(),
            event_date: NaiveDate::from_ymd_opt(2024, 11, 14).unwrap(),
            remarks: None,
        }
    }

    #[test]
    fn test_accepts_awards_deductions_and_zero() {
        assert!(award(50, "Inter-house relay").validate().is_ok());
        assert!(award(-20, "Late assembly").validate().is_ok());
        assert!(award(0, "Participation").validate().is_ok());
        assert!(award(MAX_POINTS_PER_ENTRY, "Annual day").validate().is_ok());
        assert!(award(-MAX_POINTS_PER_ENTRY, "Annual day").validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_points() {
        let errors = award(MAX_POINTS_PER_ENTRY + 1, "Quiz").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("points"));

        assert!(award(i32::MIN, "Quiz").validate().is_err());
    }

    #[test]
    fn test_validate_points_takes_value() {
        assert!(validate_points(0).is_ok());
        assert!(validate_points(-MAX_POINTS_PER_ENTRY).is_ok());
        assert!(validate_points(i32::MAX).is_err());
        assert!(validate_points(i32::MIN).is_err());
    }

    #[test]
    fn test_requires_event_name() {
        let errors = award(10, "").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("event_name"));

        let errors = award(10, "  ").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("event_name"));
    }

    #[test]
    fn test_deserializes_category_from_lowercase() {
        let json = r#"{
            "house_id": "9b2f0d1e-6a7c-4c53-9b0e-3a4d8f8e2b11",
            "category": "cultural",
            "points": 15,
            "event_name": "Debate",
            "event_date": "2024-08-15"
        }"#;
        let req: AwardPointsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.category, PointCategory::Cultural);
        assert!(req.remarks.is_none());
    }
}
