use std::fmt;

use chrono::{Datelike, NaiveDate};

pub const DEFAULT_START_MONTH: u32 = 4;

/// A school year running from the first day of `start_month` in `start_year`
/// up to (not including) the same day one year later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcademicYear {
    start_year: i32,
    start_month: u32,
}

impl AcademicYear {
    pub fn new(start_year: i32, start_month: u32) -> Result<Self, String> {
        if !(1..=12).contains(&start_month) {
            return Err(format!(
                "academic year start month must be between 1 and 12, got {}",
                start_month
            ));
        }
        if NaiveDate::from_ymd_opt(start_year + 1, start_month, 1).is_none() {
            return Err(format!("academic year {} is out of range", start_year));
        }

        Ok(Self {
            start_year,
            start_month,
        })
    }

    /// The academic year that `date` falls in.
    pub fn containing(date: NaiveDate, start_month: u32) -> Result<Self, String> {
        let start_year = if date.month() >= start_month {
            date.year()
        } else {
            date.year() - 1
        };
        Self::new(start_year, start_month)
    }

    /// Parses `2024-2025`, `2024-25` or `2024`.
    pub fn parse(input: &str, start_month: u32) -> Result<Self, String> {
        let input = input.trim();
        let invalid = || {
            format!(
                "invalid academic year '{}', expected e.g. 2024-2025, 2024-25 or 2024",
                input
            )
        };

        let (first, second) = match input.split_once('-') {
            Some((first, second)) => (first, Some(second)),
            None => (input, None),
        };

        if first.len() != 4 {
            return Err(invalid());
        }
        let start_year: i32 = first.parse().map_err(|_| invalid())?;

        if let Some(second) = second {
            let end_year: i32 = match second.len() {
                4 => second.parse().map_err(|_| invalid())?,
                2 => {
                    let short: i32 = second.parse().map_err(|_| invalid())?;
                    let century = (start_year + 1) / 100 * 100;
                    century + short
                }
                _ => return Err(invalid()),
            };

            if end_year != start_year + 1 {
                return Err(format!(
                    "academic year '{}' must span consecutive years",
                    input
                ));
            }
        }

        Self::new(start_year, start_month)
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// First day of the year (inclusive).
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year, self.start_month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// First day of the following year (exclusive).
    pub fn end_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year + 1, self.start_month, 1)
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date < self.end_date()
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_year, self.start_year + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_accepted_formats() {
        let full = AcademicYear::parse("2024-2025", 4).unwrap();
        let short = AcademicYear::parse("2024-25", 4).unwrap();
        let single = AcademicYear::parse("2024", 4).unwrap();

        assert_eq!(full, short);
        assert_eq!(full, single);
        assert_eq!(full.to_string(), "2024-2025");
    }

    #[test]
    fn test_parse_short_form_across_century() {
        let year = AcademicYear::parse("2099-00", 4).unwrap();
        assert_eq!(year.start_year(), 2099);
    }

    #[test]
    fn test_parse_rejects_non_consecutive_years() {
        assert!(AcademicYear::parse("2024-2026", 4).is_err());
        assert!(AcademicYear::parse("2024-23", 4).is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(AcademicYear::parse("", 4).is_err());
        assert!(AcademicYear::parse("24-25", 4).is_err());
        assert!(AcademicYear::parse("abcd", 4).is_err());
        assert!(AcademicYear::parse("2024-2", 4).is_err());
    }

    #[test]
    fn test_rejects_invalid_start_month() {
        assert!(AcademicYear::new(2024, 0).is_err());
        assert!(AcademicYear::new(2024, 13).is_err());
    }

    #[test]
    fn test_range_is_half_open() {
        let year = AcademicYear::new(2024, 4).unwrap();

        assert_eq!(year.start_date(), date(2024, 4, 1));
        assert_eq!(year.end_date(), date(2025, 4, 1));
        assert!(year.contains(date(2024, 4, 1)));
        assert!(year.contains(date(2025, 3, 31)));
        assert!(!year.contains(date(2025, 4, 1)));
        assert!(!year.contains(date(2024, 3, 31)));
    }

    #[test]
    fn test_containing_respects_start_month() {
        assert_eq!(
            AcademicYear::containing(date(2025, 3, 31), 4).unwrap().start_year(),
            2024
        );
        assert_eq!(
            AcademicYear::containing(date(2025, 4, 1), 4).unwrap().start_year(),
            2025
        );
        assert_eq!(
            AcademicYear::containing(date(2025, 3, 31), 1).unwrap().start_year(),
            2025
        );
    }
}
