pub mod affirmation;
pub mod common;
pub mod house;
pub mod leaderboard;
pub mod points;
