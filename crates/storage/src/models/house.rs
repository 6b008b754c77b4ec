use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct House {
    pub house_id: Uuid,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_by: String,
    /// Monotonic insertion order, used to break leaderboard ties
    pub created_seq: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
