pub mod error;
pub mod import;
pub mod report;

pub use error::{AdminError, Result};
