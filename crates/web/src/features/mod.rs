pub mod affirmations;
pub mod houses;
pub mod leaderboard;
pub mod points;
