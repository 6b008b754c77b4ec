use school_storage::dto::leaderboard::LeaderboardStanding;

/// Plain-text leaderboard table for terminal output.
pub fn format_standings(title: &str, standings: &[LeaderboardStanding]) -> String {
    let name_width = standings
        .iter()
        .map(|s| s.house.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("House".len());

    let row = |cells: [&dyn std::fmt::Display; 8]| {
        format!(
            "{:>4}  {:<name_width$}  {:>8}  {:>7}  {:>9}  {:>8}  {:>10}  {:>6}\n",
            cells[0], cells[1], cells[2], cells[3], cells[4], cells[5], cells[6], cells[7]
        )
    };

    let mut out = format!("{}\n", title);
    out.push_str(&row([
        &"Rank",
        &"House",
        &"Total",
        &"Sports",
        &"Academics",
        &"Cultural",
        &"Discipline",
        &"Other",
    ]));

    if standings.is_empty() {
        out.push_str("(no houses)\n");
        return out;
    }

    for standing in standings {
        let c = &standing.categories;
        out.push_str(&row([
            &standing.rank,
            &standing.house.name,
            &standing.total,
            &c.sports,
            &c.academics,
            &c.cultural,
            &c.discipline,
            &c.other,
        ]));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_storage::dto::{leaderboard::CategoryTotals, points::HouseSummary};
    use uuid::Uuid;

    fn standing(rank: u32, name: &str, total: i64) -> LeaderboardStanding {
        LeaderboardStanding {
            position: rank,
            rank,
            house: HouseSummary {
                house_id: Uuid::new_v4(),
                name: name.to_string(),
                slug: name.to_lowercase(),
                color: "#000000".to_string(),
            },
            total,
            categories: CategoryTotals {
                sports: total,
                ..Default::default()
            },
            entry_count: 1,
        }
    }

    #[test]
    fn test_formats_one_row_per_house() {
        let table = format_standings(
            "Leaderboard 2024-2025",
            &[standing(1, "Vivekananda", 120), standing(2, "Bose", -5)],
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Leaderboard 2024-2025");
        assert!(lines[2].starts_with("   1  Vivekananda"));
        assert!(lines[3].contains("Bose"));
        assert!(lines[3].contains("-5"));
    }

    #[test]
    fn test_columns_line_up() {
        let table = format_standings(
            "Leaderboard",
            &[standing(1, "Raman", 1500), standing(2, "Sarojini Naidu", 7)],
        );
        let widths: Vec<usize> = table.lines().skip(1).map(str::len).collect();

        assert_eq!(widths.len(), 3);
        assert!(widths.iter().all(|w| *w == widths[0]), "{table}");
    }

    #[test]
    fn test_empty_table() {
        let table = format_standings("Leaderboard", &[]);
        assert!(table.ends_with("(no houses)\n"));
    }
}
