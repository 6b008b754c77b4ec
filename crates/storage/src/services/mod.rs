pub mod daily_affirmation;
pub mod effective_date;
pub mod ranking;
