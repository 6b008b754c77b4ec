use std::collections::HashSet;

use school_storage::dto::house::validate_color;
use school_storage::dto::points::MAX_POINTS_PER_ENTRY;
use tracing::warn;

use super::models::{ImportDocument, house_key};
use crate::{AdminError, Result};

pub struct ImportValidator;

impl ImportValidator {
    /// Checks the whole document and reports every problem at once.
    ///
    /// `known_houses` are names already stored, which entries may reference
    /// without the file redefining them.
    pub fn validate(document: &ImportDocument, known_houses: &[String]) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if document.houses.is_empty() && document.entries.is_empty() {
            report.warnings.push("Import file is empty".to_string());
        }

        let mut file_houses = HashSet::new();
        for (idx, house) in document.houses.iter().enumerate() {
            let label = format!("house #{} '{}'", idx + 1, house.name);

            if house.name.trim().is_empty() {
                report.errors.push(format!("{}: name cannot be empty", label));
            } else if house.name.chars().count() > 100 {
                report
                    .errors
                    .push(format!("{}: name is longer than 100 characters", label));
            }
            if validate_color(&house.color).is_err() {
                report.errors.push(format!(
                    "{}: invalid color '{}', expected #RRGGBB",
                    label, house.color
                ));
            }
            if !file_houses.insert(house_key(&house.name)) {
                report
                    .errors
                    .push(format!("Duplicate house name: '{}'", house.name));
            }
        }

        let known: HashSet<String> = known_houses.iter().map(|name| house_key(name)).collect();
        for house in &document.houses {
            if known.contains(&house_key(&house.name)) {
                report.warnings.push(format!(
                    "House '{}' already exists and will be reused as is",
                    house.name
                ));
            }
        }

        for (idx, entry) in document.entries.iter().enumerate() {
            let label = format!("entry #{} '{}'", idx + 1, entry.event_name);
            let key = house_key(&entry.house);

            if !file_houses.contains(&key) && !known.contains(&key) {
                report
                    .errors
                    .push(format!("{}: unknown house '{}'", label, entry.house));
            }
            if entry.event_name.trim().is_empty() {
                report
                    .errors
                    .push(format!("entry #{}: event_name cannot be empty", idx + 1));
            } else if entry.event_name.chars().count() > 255 {
                report
                    .errors
                    .push(format!("{}: event_name is longer than 255 characters", label));
            }
            if entry.points.unsigned_abs() > MAX_POINTS_PER_ENTRY.unsigned_abs() {
                report.errors.push(format!(
                    "{}: points {} outside -{}..={}",
                    label, entry.points, MAX_POINTS_PER_ENTRY, MAX_POINTS_PER_ENTRY
                ));
            }
            if entry.points == 0 {
                report
                    .warnings
                    .push(format!("{}: awards zero points", label));
            }
        }

        if !report.errors.is_empty() {
            Err(AdminError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}
