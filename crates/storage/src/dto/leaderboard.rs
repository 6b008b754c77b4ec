use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::points::HouseSummary;
use crate::models::PointCategory;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct LeaderboardFilter {
    /// Academic year such as `2024-2025`. Defaults to the current one.
    pub academic_year: Option<String>,
    /// Only count points from this category
    pub category: Option<PointCategory>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryTotals {
    pub sports: i64,
    pub academics: i64,
    pub cultural: i64,
    pub discipline: i64,
    pub other: i64,
}

impl CategoryTotals {
    pub fn get_mut(&mut self, category: PointCategory) -> &mut i64 {
        match category {
            PointCategory::Sports => &mut self.sports,
            PointCategory::Academics => &mut self.academics,
            PointCategory::Cultural => &mut self.cultural,
            PointCategory::Discipline => &mut self.discipline,
            PointCategory::Other => &mut self.other,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardStanding {
    /// 1-based place in the ordering, unique per house
    pub position: u32,
    /// Competition rank: houses with equal totals share it
    pub rank: u32,
    pub house: HouseSummary,
    pub total: i64,
    #[serde(flatten)]
    pub categories: CategoryTotals,
    pub entry_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub academic_year: String,
    pub category: Option<PointCategory>,
    pub standings: Vec<LeaderboardStanding>,
}
