use chrono::NaiveDate;

use crate::error::Result;
use crate::models::Affirmation;

/// Date-keyed access to active affirmations.
#[async_trait::async_trait]
pub trait AffirmationLookup: Send + Sync {
    /// Most recently created active affirmation dated exactly `date`.
    async fn active_on(&self, date: NaiveDate) -> Result<Option<Affirmation>>;

    /// Active affirmation with the latest `date <= on_or_before`.
    async fn latest_active_until(&self, on_or_before: NaiveDate) -> Result<Option<Affirmation>>;
}

#[derive(Debug, Clone)]
pub struct DailyAffirmation {
    pub affirmation: Affirmation,
    pub exact_match: bool,
}

/// Finds the affirmation to show for `effective_date`.
///
/// An exact date match wins. Otherwise the most recent earlier affirmation is
/// used, so the site keeps showing something when a day was skipped.
pub async fn resolve_for_date<L>(lookup: &L, effective_date: NaiveDate) -> Result<Option<DailyAffirmation>>
where
    L: AffirmationLookup + ?Sized,
{
    if let Some(affirmation) = lookup.active_on(effective_date).await? {
        return Ok(Some(DailyAffirmation {
            affirmation,
            exact_match: true,
        }));
    }

    let fallback = lookup
        .latest_active_until(effective_date)
        .await?
        .map(|affirmation| DailyAffirmation {
            affirmation,
            exact_match: false,
        });

    Ok(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use uuid::Uuid;

    struct InMemory(Vec<Affirmation>);

    #[async_trait::async_trait]
    impl AffirmationLookup for InMemory {
        async fn active_on(&self, date: NaiveDate) -> Result<Option<Affirmation>> {
            Ok(self
                .0
                .iter()
                .filter(|a| a.is_active && a.date == date)
                .max_by_key(|a| a.created_at)
                .cloned())
        }

        async fn latest_active_until(&self, on_or_before: NaiveDate) -> Result<Option<Affirmation>> {
            Ok(self
                .0
                .iter()
                .filter(|a| a.is_active && a.date <= on_or_before)
                .max_by_key(|a| (a.date, a.created_at))
                .cloned())
        }
    }

    fn dec(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, day).unwrap()
    }

    fn created(minute: u32) -> NaiveDateTime {
        dec(1).and_hms_opt(8, minute, 0).unwrap()
    }

    fn affirmation(content: &str, date: NaiveDate, is_active: bool, created_at: NaiveDateTime) -> Affirmation {
        Affirmation {
            affirmation_id: Uuid::new_v4(),
            content: content.to_string(),
            author: None,
            date,
            is_active,
            created_by: "admin".to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn test_exact_match_wins() {
        let lookup = InMemory(vec![
            affirmation("first", dec(1), true, created(0)),
            affirmation("fifth", dec(5), true, created(1)),
        ]);

        let found = resolve_for_date(&lookup, dec(5)).await.unwrap().unwrap();
        assert_eq!(found.affirmation.content, "fifth");
        assert!(found.exact_match);
    }

    #[tokio::test]
    async fn test_falls_back_to_most_recent_earlier_record() {
        let lookup = InMemory(vec![
            affirmation("first", dec(1), true, created(0)),
            affirmation("fifth", dec(5), true, created(1)),
        ]);

        let found = resolve_for_date(&lookup, dec(9)).await.unwrap().unwrap();
        assert_eq!(found.affirmation.content, "fifth");
        assert!(!found.exact_match);
    }

    #[tokio::test]
    async fn test_ignores_inactive_and_future_records() {
        let lookup = InMemory(vec![
            affirmation("first", dec(1), true, created(0)),
            affirmation("hidden", dec(5), false, created(1)),
            affirmation("future", dec(10), true, created(2)),
        ]);

        let found = resolve_for_date(&lookup, dec(9)).await.unwrap().unwrap();
        assert_eq!(found.affirmation.content, "first");
    }

    #[tokio::test]
    async fn test_nothing_before_effective_date() {
        let lookup = InMemory(vec![affirmation("later", dec(10), true, created(0))]);

        assert!(resolve_for_date(&lookup, dec(9)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_same_day_prefers_latest_created() {
        let lookup = InMemory(vec![
            affirmation("draft", dec(9), true, created(0)),
            affirmation("final", dec(9), true, created(30)),
        ]);

        let found = resolve_for_date(&lookup, dec(9)).await.unwrap().unwrap();
        assert_eq!(found.affirmation.content, "final");
    }
}
