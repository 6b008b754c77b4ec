use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::leaderboard::{CategoryTotals, LeaderboardStanding};
use crate::dto::points::HouseSummary;
use crate::error::Result;
use crate::models::{AcademicYear, PointCategory};
use crate::services::ranking::{HouseTally, rank_houses};

#[derive(FromRow)]
struct TallyRow {
    house_id: Uuid,
    name: String,
    slug: String,
    color: String,
    created_seq: i64,
    total: i64,
    sports: i64,
    academics: i64,
    cultural: i64,
    discipline: i64,
    other: i64,
    entry_count: i64,
}

impl From<TallyRow> for HouseTally {
    fn from(row: TallyRow) -> Self {
        Self {
            house: HouseSummary {
                house_id: row.house_id,
                name: row.name,
                slug: row.slug,
                color: row.color,
            },
            created_seq: row.created_seq,
            total: row.total,
            categories: CategoryTotals {
                sports: row.sports,
                academics: row.academics,
                cultural: row.cultural,
                discipline: row.discipline,
                other: row.other,
            },
            entry_count: row.entry_count,
        }
    }
}

pub struct LeaderboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeaderboardRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Ranked standings of every active house for one academic year.
    ///
    /// Totals are summed from the ledger on every call; nothing is cached.
    pub async fn standings(
        &self,
        academic_year: AcademicYear,
        category: Option<PointCategory>,
    ) -> Result<Vec<LeaderboardStanding>> {
        let tallies = self.tallies(academic_year, category).await?;
        tracing::debug!(
            academic_year = %academic_year,
            category = ?category,
            houses = tallies.len(),
            "Summed house points"
        );
        Ok(rank_houses(tallies))
    }

    async fn tallies(
        &self,
        academic_year: AcademicYear,
        category: Option<PointCategory>,
    ) -> Result<Vec<HouseTally>> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT
                h.house_id,
                h.name,
                h.slug,
                h.color,
                h.created_seq,
                COALESCE(SUM(pe.points), 0)::BIGINT AS total,
                COALESCE(SUM(pe.points) FILTER (WHERE pe.category = 'sports'), 0)::BIGINT AS sports,
                COALESCE(SUM(pe.points) FILTER (WHERE pe.category = 'academics'), 0)::BIGINT AS academics,
                COALESCE(SUM(pe.points) FILTER (WHERE pe.category = 'cultural'), 0)::BIGINT AS cultural,
                COALESCE(SUM(pe.points) FILTER (WHERE pe.category = 'discipline'), 0)::BIGINT AS discipline,
                COALESCE(SUM(pe.points) FILTER (WHERE pe.category = 'other'), 0)::BIGINT AS other,
                COUNT(pe.entry_id) AS entry_count
            FROM houses h
            LEFT JOIN point_entries pe
                ON pe.house_id = h.house_id
               AND pe.event_date >=
            "#,
        );
        query.push_bind(academic_year.start_date());
        query.push(" AND pe.event_date < ");
        query.push_bind(academic_year.end_date());

        if let Some(category) = category {
            query.push(" AND pe.category = ");
            query.push_bind(category);
        }

        query.push(
            r#"
            WHERE h.is_active
            GROUP BY h.house_id, h.name, h.slug, h.color, h.created_seq
            "#,
        );

        let rows: Vec<TallyRow> = query.build_query_as().fetch_all(self.pool).await?;

        Ok(rows.into_iter().map(HouseTally::from).collect())
    }
}
