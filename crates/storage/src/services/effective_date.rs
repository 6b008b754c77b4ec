use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parses a daily changeover time written as `H:MM`, `HH:MM` or `HH:MM:SS`.
pub fn parse_change_time(input: &str) -> Result<NaiveTime, String> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .map_err(|e| format!("invalid change time '{}', expected HH:MM: {}", input, e))
}

/// The calendar date whose content is "current" at `now`.
///
/// Before today's `change_time` the previous day is still current. The change
/// instant itself already belongs to today.
pub fn effective_date(change_time: NaiveTime, now: NaiveDateTime) -> NaiveDate {
    let today = now.date();
    let change_instant = today.and_time(change_time);

    if now < change_instant {
        today.pred_opt().unwrap_or(today)
    } else {
        today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: NaiveDate, time: &str) -> NaiveDateTime {
        date.and_time(parse_change_time(time).unwrap())
    }

    fn dec(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, day).unwrap()
    }

    #[test]
    fn test_before_change_time_is_yesterday() {
        let change = parse_change_time("06:00").unwrap();
        assert_eq!(effective_date(change, at(dec(9), "05:59")), dec(8));
    }

    #[test]
    fn test_change_instant_is_today() {
        let change = parse_change_time("06:00").unwrap();
        assert_eq!(effective_date(change, at(dec(9), "06:00")), dec(9));
        assert_eq!(effective_date(change, at(dec(9), "23:59")), dec(9));
    }

    #[test]
    fn test_midnight_default_is_always_today() {
        let change = parse_change_time("00:00").unwrap();
        assert_eq!(effective_date(change, at(dec(9), "00:00")), dec(9));
        assert_eq!(effective_date(change, at(dec(9), "00:01")), dec(9));
    }

    #[test]
    fn test_rolls_back_across_year_boundary() {
        let change = parse_change_time("07:30").unwrap();
        let new_year = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(effective_date(change, at(new_year, "07:29")), dec(31));
    }

    #[test]
    fn test_parse_change_time_formats() {
        assert_eq!(
            parse_change_time("6:05").unwrap(),
            NaiveTime::from_hms_opt(6, 5, 0).unwrap()
        );
        assert_eq!(
            parse_change_time("23:59:30").unwrap(),
            NaiveTime::from_hms_opt(23, 59, 30).unwrap()
        );
    }

    #[test]
    fn test_parse_change_time_rejects_invalid() {
        for bad in ["", "6", "24:00", "12:60", "ab:cd", "12:00:00:00", "-1:00", "06:00pm"] {
            assert!(parse_change_time(bad).is_err(), "{bad} should be rejected");
        }
    }
}
