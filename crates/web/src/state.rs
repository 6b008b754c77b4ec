use axum::extract::FromRef;
use chrono::{Local, NaiveDate, NaiveTime};
use school_storage::{Database, models::AcademicYear};

use crate::error::{WebError, WebResult};

/// Display rules that depend on configuration rather than stored data.
#[derive(Debug, Clone, Copy)]
pub struct SiteSettings {
    pub affirmation_change_time: NaiveTime,
    pub academic_year_start_month: u32,
}

impl SiteSettings {
    pub fn academic_year(&self, input: &str) -> WebResult<AcademicYear> {
        AcademicYear::parse(input, self.academic_year_start_month).map_err(WebError::BadRequest)
    }

    pub fn academic_year_containing(&self, date: NaiveDate) -> WebResult<AcademicYear> {
        AcademicYear::containing(date, self.academic_year_start_month)
            .map_err(WebError::InternalServerError)
    }

    /// The requested academic year, or the one containing today
    pub fn academic_year_or_current(&self, input: Option<&str>) -> WebResult<AcademicYear> {
        match input {
            Some(year) => self.academic_year(year),
            None => self.academic_year_containing(Local::now().date_naive()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub settings: SiteSettings,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for SiteSettings {
    fn from_ref(state: &AppState) -> Self {
        state.settings
    }
}
