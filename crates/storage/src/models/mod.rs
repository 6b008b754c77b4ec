pub mod academic_year;
pub mod affirmation;
pub mod house;
pub mod point_entry;

pub use academic_year::AcademicYear;
pub use affirmation::Affirmation;
pub use house::House;
pub use point_entry::{PointCategory, PointEntry};
