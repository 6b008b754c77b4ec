pub mod affirmation;
pub mod house;
pub mod leaderboard;
pub mod points;
