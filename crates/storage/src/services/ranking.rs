use std::cmp::Ordering;
use std::collections::HashMap;

use uuid::Uuid;

use crate::dto::leaderboard::{CategoryTotals, LeaderboardStanding};
use crate::dto::points::HouseSummary;
use crate::models::{AcademicYear, House, PointCategory, PointEntry};

/// Summed ledger points for one house within a leaderboard scope.
#[derive(Debug, Clone)]
pub struct HouseTally {
    pub house: HouseSummary,
    /// Creation order of the house; lower was created first
    pub created_seq: i64,
    pub total: i64,
    pub categories: CategoryTotals,
    pub entry_count: i64,
}

impl HouseTally {
    pub fn empty(house: &House) -> Self {
        Self {
            house: HouseSummary {
                house_id: house.house_id,
                name: house.name.clone(),
                slug: house.slug.clone(),
                color: house.color.clone(),
            },
            created_seq: house.created_seq,
            total: 0,
            categories: CategoryTotals::default(),
            entry_count: 0,
        }
    }

    fn add(&mut self, entry: &PointEntry) {
        let points = i64::from(entry.points);
        self.total += points;
        self.entry_count += 1;
        *self.categories.get_mut(entry.category) += points;
    }
}

/// Higher totals first, then the earlier-created house, then the lower id.
fn standing_order(a: &HouseTally, b: &HouseTally) -> Ordering {
    b.total
        .cmp(&a.total)
        .then_with(|| a.created_seq.cmp(&b.created_seq))
        .then_with(|| a.house.house_id.cmp(&b.house.house_id))
}

/// Orders tallies into leaderboard standings.
///
/// `position` is unique and follows the total order. `rank` is shared by
/// houses with equal totals and skips ahead after a tie (1, 2, 2, 4).
pub fn rank_houses(mut tallies: Vec<HouseTally>) -> Vec<LeaderboardStanding> {
    tallies.sort_by(standing_order);

    let mut standings = Vec::with_capacity(tallies.len());
    let mut rank = 0u32;
    let mut previous_total = None;

    for (index, tally) in tallies.into_iter().enumerate() {
        let position = index as u32 + 1;
        if previous_total != Some(tally.total) {
            rank = position;
            previous_total = Some(tally.total);
        }

        standings.push(LeaderboardStanding {
            position,
            rank,
            house: tally.house,
            total: tally.total,
            categories: tally.categories,
            entry_count: tally.entry_count,
        });
    }

    standings
}

/// Sums in-memory ledger entries per active house, the same way the
/// leaderboard query does in the database.
pub fn tally_entries(
    houses: &[House],
    entries: &[PointEntry],
    academic_year: Option<AcademicYear>,
    category: Option<PointCategory>,
) -> Vec<HouseTally> {
    let mut tallies: HashMap<Uuid, HouseTally> = houses
        .iter()
        .filter(|house| house.is_active)
        .map(|house| (house.house_id, HouseTally::empty(house)))
        .collect();

    for entry in entries {
        if academic_year.is_some_and(|year| !year.contains(entry.event_date)) {
            continue;
        }
        if category.is_some_and(|c| c != entry.category) {
            continue;
        }
        if let Some(tally) = tallies.get_mut(&entry.house_id) {
            tally.add(entry);
        }
    }

    tallies.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    /// Every house shares one timestamp, as rows inserted in one transaction do.
    fn house(name: &str, created_seq: i64) -> House {
        let created_at = base_time();
        House {
            house_id: Uuid::new_v4(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            color: "#123456".to_string(),
            display_order: 0,
            is_active: true,
            created_by: "admin".to_string(),
            created_seq,
            created_at,
            updated_at: created_at,
        }
    }

    fn entry(house: &House, category: PointCategory, points: i32, day: (i32, u32, u32)) -> PointEntry {
        PointEntry {
            entry_id: Uuid::new_v4(),
            house_id: house.house_id,
            category,
            points,
            event_name: "Event".to_string(),
            event_date: NaiveDate::from_ymd_opt(day.0, day.1, day.2).unwrap(),
            remarks: None,
            awarded_by: "admin".to_string(),
            created_at: base_time(),
        }
    }

    fn total_of(houses: &[House], entries: &[PointEntry], house: &House) -> i64 {
        tally_entries(houses, entries, None, None)
            .into_iter()
            .find(|t| t.house.house_id == house.house_id)
            .map(|t| t.total)
            .unwrap()
    }

    #[test]
    fn test_orders_by_total_descending() {
        let houses = vec![house("Agni", 0), house("Vayu", 1), house("Jal", 2)];
        let entries = vec![
            entry(&houses[0], PointCategory::Sports, 10, (2024, 5, 1)),
            entry(&houses[1], PointCategory::Sports, 30, (2024, 5, 1)),
            entry(&houses[2], PointCategory::Cultural, 20, (2024, 5, 1)),
        ];

        let standings = rank_houses(tally_entries(&houses, &entries, None, None));
        let names: Vec<_> = standings.iter().map(|s| s.house.name.as_str()).collect();
        assert_eq!(names, ["Vayu", "Jal", "Agni"]);
        assert_eq!(
            standings.iter().map(|s| s.position).collect::<Vec<_>>(),
            [1, 2, 3]
        );
    }

    #[test]
    fn test_ties_go_to_earlier_created_house() {
        let houses = vec![house("Later", 5), house("Earlier", 0), house("Leader", 9)];
        let entries = vec![
            entry(&houses[0], PointCategory::Sports, 40, (2024, 6, 1)),
            entry(&houses[1], PointCategory::Academics, 40, (2024, 6, 1)),
            entry(&houses[2], PointCategory::Academics, 90, (2024, 6, 1)),
        ];

        let standings = rank_houses(tally_entries(&houses, &entries, None, None));
        let summary: Vec<_> = standings
            .iter()
            .map(|s| (s.house.name.as_str(), s.position, s.rank))
            .collect();
        assert_eq!(
            summary,
            [("Leader", 1, 1), ("Earlier", 2, 2), ("Later", 3, 2)]
        );
    }

    #[test]
    fn test_ties_follow_creation_order_not_house_id() {
        let mut first = house("First", 1);
        first.house_id = Uuid::from_u128(u128::MAX);
        let mut second = house("Second", 2);
        second.house_id = Uuid::from_u128(1);
        assert_eq!(first.created_at, second.created_at);

        let houses = vec![second.clone(), first.clone()];
        let entries = vec![
            entry(&first, PointCategory::Sports, 30, (2024, 6, 1)),
            entry(&second, PointCategory::Sports, 30, (2024, 6, 1)),
        ];

        let standings = rank_houses(tally_entries(&houses, &entries, None, None));
        let order: Vec<_> = standings.iter().map(|s| s.house.name.as_str()).collect();
        assert_eq!(order, ["First", "Second"]);
        assert_eq!(standings[1].rank, 1);
    }

    #[test]
    fn test_rank_skips_after_tie() {
        let houses = vec![house("A", 0), house("B", 1), house("C", 2), house("D", 3)];
        let entries = vec![
            entry(&houses[0], PointCategory::Other, 5, (2024, 6, 1)),
            entry(&houses[1], PointCategory::Other, 5, (2024, 6, 1)),
            entry(&houses[2], PointCategory::Other, 1, (2024, 6, 1)),
        ];

        let ranks: Vec<_> = rank_houses(tally_entries(&houses, &entries, None, None))
            .iter()
            .map(|s| s.rank)
            .collect();
        assert_eq!(ranks, [1, 1, 3, 4]);
    }

    #[test]
    fn test_houses_without_entries_and_negative_totals() {
        let houses = vec![house("Quiet", 0), house("Rowdy", 1)];
        let entries = vec![entry(&houses[1], PointCategory::Discipline, -15, (2024, 7, 1))];

        let standings = rank_houses(tally_entries(&houses, &entries, None, None));
        assert_eq!(standings[0].house.name, "Quiet");
        assert_eq!(standings[0].total, 0);
        assert_eq!(standings[0].entry_count, 0);
        assert_eq!(standings[1].total, -15);
        assert_eq!(standings[1].categories.discipline, -15);
    }

    #[test]
    fn test_revoking_entries_reverses_their_contribution() {
        let houses = vec![house("Agni", 0)];
        let award = entry(&houses[0], PointCategory::Sports, 50, (2024, 8, 1));
        let deduction = entry(&houses[0], PointCategory::Discipline, -20, (2024, 8, 2));
        let zero = entry(&houses[0], PointCategory::Other, 0, (2024, 8, 3));
        let base = entry(&houses[0], PointCategory::Academics, 100, (2024, 8, 4));

        let mut ledger = vec![base.clone(), award.clone(), deduction.clone(), zero.clone()];
        assert_eq!(total_of(&houses, &ledger, &houses[0]), 130);

        ledger.retain(|e| e.entry_id != award.entry_id);
        assert_eq!(total_of(&houses, &ledger, &houses[0]), 80);

        ledger.retain(|e| e.entry_id != deduction.entry_id);
        assert_eq!(total_of(&houses, &ledger, &houses[0]), 100);

        ledger.retain(|e| e.entry_id != zero.entry_id);
        assert_eq!(total_of(&houses, &ledger, &houses[0]), 100);
    }

    #[test]
    fn test_total_always_equals_sum_of_live_entries() {
        let houses = vec![house("Agni", 0), house("Vayu", 1)];
        let mut ledger: Vec<PointEntry> = Vec::new();

        let values = [25, -5, 0, 70, -40, 13, 8, -1];
        for (i, points) in values.iter().enumerate() {
            let owner = &houses[i % 2];
            ledger.push(entry(owner, PointCategory::Sports, *points, (2024, 9, 1)));

            if i % 3 == 2 {
                ledger.remove(0);
            }

            for house in &houses {
                let expected: i64 = ledger
                    .iter()
                    .filter(|e| e.house_id == house.house_id)
                    .map(|e| i64::from(e.points))
                    .sum();
                assert_eq!(total_of(&houses, &ledger, house), expected);
            }
        }
    }

    #[test]
    fn test_scopes_by_academic_year_and_category() {
        let houses = vec![house("Agni", 0)];
        let entries = vec![
            entry(&houses[0], PointCategory::Sports, 10, (2024, 3, 31)),
            entry(&houses[0], PointCategory::Sports, 20, (2024, 4, 1)),
            entry(&houses[0], PointCategory::Cultural, 7, (2025, 3, 31)),
            entry(&houses[0], PointCategory::Sports, 40, (2025, 4, 1)),
        ];
        let year = AcademicYear::new(2024, 4).unwrap();

        let tally = &tally_entries(&houses, &entries, Some(year), None)[0];
        assert_eq!(tally.total, 27);
        assert_eq!(tally.categories.sports, 20);
        assert_eq!(tally.categories.cultural, 7);
        assert_eq!(tally.entry_count, 2);

        let sports_only = &tally_entries(&houses, &entries, Some(year), Some(PointCategory::Sports))[0];
        assert_eq!(sports_only.total, 20);
    }

    #[test]
    fn test_inactive_houses_are_left_out() {
        let mut retired = house("Retired", 0);
        retired.is_active = false;
        let houses = vec![retired, house("Active", 1)];

        let standings = rank_houses(tally_entries(&houses, &[], None, None));
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].house.name, "Active");
    }
}
