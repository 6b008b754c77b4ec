use std::collections::HashMap;

use chrono::NaiveDateTime;
use school_storage::{
    dto::{
        house::CreateHouseRequest, leaderboard::LeaderboardStanding, points::AwardPointsRequest,
    },
    models::{House, PointEntry},
    repository::{house::HouseRepository, points::PointsRepository},
    services::ranking::{rank_houses, tally_entries},
};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{ImportDocument, house_key};
use crate::{AdminError, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub houses_created: usize,
    pub houses_reused: usize,
    pub entries_created: usize,
}

pub struct ImportLoader<'a> {
    pool: &'a PgPool,
}

impl<'a> ImportLoader<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Names of every stored house, active or not
    pub async fn known_house_names(&self) -> Result<Vec<String>> {
        let houses = HouseRepository::new(self.pool).list(true).await?;
        Ok(houses.into_iter().map(|house| house.name).collect())
    }

    /// Writes the document in one transaction; nothing is kept if any row fails.
    pub async fn load(&self, document: &ImportDocument, actor: &str) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();
        let mut house_ids: HashMap<String, Uuid> = HashMap::new();

        let mut tx = self.pool.begin().await?;

        for house in &document.houses {
            let house_id = match HouseRepository::find_by_name_in(&mut tx, &house.name).await? {
                Some(existing) => {
                    summary.houses_reused += 1;
                    existing.house_id
                }
                None => {
                    let request = CreateHouseRequest {
                        name: house.name.clone(),
                        color: house.color.clone(),
                        display_order: house.display_order,
                        is_active: house.is_active,
                    };
                    let created = HouseRepository::create_in(&mut tx, &request, actor).await?;
                    tracing::debug!(house_id = %created.house_id, slug = %created.slug, "Created house");
                    summary.houses_created += 1;
                    created.house_id
                }
            };
            house_ids.insert(house_key(&house.name), house_id);
        }

        for entry in &document.entries {
            let key = house_key(&entry.house);
            let house_id = match house_ids.get(&key) {
                Some(id) => *id,
                None => {
                    let house = HouseRepository::find_by_name_in(&mut tx, &entry.house)
                        .await?
                        .ok_or_else(|| {
                            AdminError::ValidationError(format!("unknown house '{}'", entry.house))
                        })?;
                    house_ids.insert(key, house.house_id);
                    house.house_id
                }
            };

            let request = AwardPointsRequest {
                house_id,
                category: entry.category,
                points: entry.points,
                event_name: entry.event_name.clone(),
                event_date: entry.event_date,
                remarks: entry.remarks.clone(),
            };
            PointsRepository::award_in(&mut tx, &request, actor).await?;
            summary.entries_created += 1;
        }

        tx.commit().await?;

        tracing::info!(
            houses_created = summary.houses_created,
            houses_reused = summary.houses_reused,
            entries_created = summary.entries_created,
            actor = %actor,
            "Import committed"
        );

        Ok(summary)
    }
}

/// Standings produced by the file's own entries, without touching the database.
///
/// Houses keep file order for tie-breaks; houses only referenced by entries
/// come after the ones the file defines.
pub fn preview_standings(document: &ImportDocument) -> Vec<LeaderboardStanding> {
    let mut houses: Vec<House> = Vec::new();
    let mut ids: HashMap<String, Uuid> = HashMap::new();

    let referenced = document
        .houses
        .iter()
        .map(|house| (house.name.as_str(), house.color.as_str(), house.is_active))
        .chain(
            document
                .entries
                .iter()
                .map(|entry| (entry.house.as_str(), "#000000", true)),
        );

    for (name, color, is_active) in referenced {
        let key = house_key(name);
        if ids.contains_key(&key) {
            continue;
        }

        let created_seq = houses.len() as i64;
        let house_id = Uuid::new_v4();
        ids.insert(key.clone(), house_id);
        houses.push(House {
            house_id,
            name: name.trim().to_string(),
            slug: key,
            color: color.to_string(),
            display_order: 0,
            is_active,
            created_by: String::new(),
            created_seq,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        });
    }

    let entries: Vec<PointEntry> = document
        .entries
        .iter()
        .filter_map(|entry| {
            let house_id = *ids.get(&house_key(&entry.house))?;
            Some(PointEntry {
                entry_id: Uuid::new_v4(),
                house_id,
                category: entry.category,
                points: entry.points,
                event_name: entry.event_name.clone(),
                event_date: entry.event_date,
                remarks: entry.remarks.clone(),
                awarded_by: String::new(),
                created_at: NaiveDateTime::default(),
            })
        })
        .collect();

    rank_houses(tally_entries(&houses, &entries, None, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::models::{ImportEntry, ImportHouse};
    use chrono::NaiveDate;
    use school_storage::models::PointCategory;

    fn document() -> ImportDocument {
        let house = |name: &str| ImportHouse {
            name: name.to_string(),
            color: "#AA0000".to_string(),
            display_order: 0,
            is_active: true,
        };
        let entry = |house: &str, category, points| ImportEntry {
            house: house.to_string(),
            category,
            points,
            event_name: "Sports day".to_string(),
            event_date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            remarks: None,
        };

        ImportDocument {
            houses: vec![house("Tagore"), house("Raman")],
            entries: vec![
                entry("tagore", PointCategory::Sports, 30),
                entry("Raman", PointCategory::Sports, 20),
                entry("Raman", PointCategory::Discipline, 10),
                entry("Bose", PointCategory::Cultural, 45),
            ],
        }
    }

    #[test]
    fn test_preview_ranks_file_entries() {
        let standings = preview_standings(&document());
        let summary: Vec<_> = standings
            .iter()
            .map(|s| (s.house.name.as_str(), s.total, s.position, s.rank))
            .collect();

        assert_eq!(
            summary,
            [
                ("Bose", 45, 1, 1),
                ("Tagore", 30, 2, 2),
                ("Raman", 30, 3, 2),
            ]
        );
        assert_eq!(standings[2].categories.discipline, 10);
    }

    #[test]
    fn test_preview_of_empty_document() {
        assert!(preview_standings(&ImportDocument::default()).is_empty());
    }
}
