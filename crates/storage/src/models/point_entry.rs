use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "point_category", rename_all = "lowercase")]
pub enum PointCategory {
    Sports,
    Academics,
    Cultural,
    Discipline,
    Other,
}

impl PointCategory {
    pub const ALL: [PointCategory; 5] = [
        Self::Sports,
        Self::Academics,
        Self::Cultural,
        Self::Discipline,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sports => "sports",
            Self::Academics => "academics",
            Self::Cultural => "cultural",
            Self::Discipline => "discipline",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PointCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PointCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown category '{}', expected one of: sports, academics, cultural, discipline, other",
                    s
                )
            })
    }
}

/// One award (positive) or deduction (negative) booked against a house.
///
/// Entries are never edited. Revoking one deletes the row, and the house total
/// follows because totals are always summed from the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PointEntry {
    pub entry_id: Uuid,
    pub house_id: Uuid,
    pub category: PointCategory,
    pub points: i32,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub remarks: Option<String>,
    pub awarded_by: String,
    pub created_at: NaiveDateTime,
}
