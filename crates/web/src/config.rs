use anyhow::{Context, Result, anyhow};
use chrono::NaiveTime;
use school_storage::models::academic_year::DEFAULT_START_MONTH;
use school_storage::services::effective_date::parse_change_time;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub affirmation_change_time: NaiveTime,
    pub academic_year_start_month: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let change_time = lookup("AFFIRMATION_CHANGE_TIME").unwrap_or_else(|| "00:00".to_string());
        let start_month = match lookup("ACADEMIC_YEAR_START_MONTH") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .context("ACADEMIC_YEAR_START_MONTH must be a number")?,
            None => DEFAULT_START_MONTH,
        };
        if !(1..=12).contains(&start_month) {
            return Err(anyhow!(
                "ACADEMIC_YEAR_START_MONTH must be between 1 and 12, got {}",
                start_month
            ));
        }

        Ok(Self {
            host: lookup("HOST").context("Cannot load HOST env variable")?,
            port: lookup("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: lookup("DATABASE_URL").context("Cannot load DATABASE_URL env variable")?,
            api_keys: lookup("API_KEYS").unwrap_or_default(),
            affirmation_change_time: parse_change_time(&change_time)
                .map_err(|e| anyhow!("AFFIRMATION_CHANGE_TIME: {}", e))?,
            academic_year_start_month: start_month,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("HOST", "127.0.0.1"),
        ("PORT", "8080"),
        ("DATABASE_URL", "postgres://localhost/school"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_keys, "");
        assert_eq!(config.affirmation_change_time, NaiveTime::MIN);
        assert_eq!(config.academic_year_start_month, 4);
    }

    #[test]
    fn test_reads_optional_settings() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("AFFIRMATION_CHANGE_TIME", "06:30"));
        vars.push(("ACADEMIC_YEAR_START_MONTH", "6"));

        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(
            config.affirmation_change_time,
            NaiveTime::from_hms_opt(6, 30, 0).unwrap()
        );
        assert_eq!(config.academic_year_start_month, 6);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut bad_time = REQUIRED.to_vec();
        bad_time.push(("AFFIRMATION_CHANGE_TIME", "25:00"));
        assert!(Config::from_lookup(lookup(&bad_time)).is_err());

        let mut bad_month = REQUIRED.to_vec();
        bad_month.push(("ACADEMIC_YEAR_START_MONTH", "13"));
        assert!(Config::from_lookup(lookup(&bad_month)).is_err());

        let mut bad_port = REQUIRED.to_vec();
        bad_port[1] = ("PORT", "http");
        assert!(Config::from_lookup(lookup(&bad_port)).is_err());
    }

    #[test]
    fn test_requires_database_url() {
        assert!(Config::from_lookup(lookup(&REQUIRED[..2])).is_err());
    }
}
