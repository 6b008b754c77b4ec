use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{PaginationParams, default_page, default_page_size};
use super::house::validate_not_blank;
use crate::models::Affirmation;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAffirmationRequest {
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Content must be between 1 and 1000 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,

    #[validate(length(max = 255))]
    pub author: Option<String>,

    pub date: NaiveDate,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAffirmationRequest {
    #[validate(length(min = 1, max = 1000))]
    #[validate(custom(function = "validate_not_blank"))]
    pub content: Option<String>,

    #[validate(length(max = 255))]
    pub author: Option<String>,

    pub date: Option<NaiveDate>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AffirmationListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Only list active affirmations
    #[serde(default)]
    pub active_only: bool,
}

impl AffirmationListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.page_size)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct TodayQuery {
    /// Local wall-clock time to evaluate instead of now, e.g. `2024-12-09T05:59:00`
    pub at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AffirmationResponse {
    pub affirmation_id: Uuid,
    pub content: String,
    pub author: Option<String>,
    pub date: NaiveDate,
    pub is_active: bool,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Affirmation> for AffirmationResponse {
    fn from(affirmation: Affirmation) -> Self {
        Self {
            affirmation_id: affirmation.affirmation_id,
            content: affirmation.content,
            author: affirmation.author,
            date: affirmation.date,
            is_active: affirmation.is_active,
            created_by: affirmation.created_by,
            created_at: affirmation.created_at,
            updated_at: affirmation.updated_at,
        }
    }
}

/// The affirmation to display for the current effective date
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TodayAffirmationResponse {
    pub effective_date: NaiveDate,
    /// False when an earlier affirmation was used because none is dated on the effective date
    pub exact_match: bool,
    pub affirmation: AffirmationResponse,
}

fn default_active() -> bool {
    true
}
