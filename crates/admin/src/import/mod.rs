pub mod loader;
pub mod models;
pub mod validator;

pub use loader::{ImportLoader, ImportSummary};
pub use models::{ImportDocument, ImportEntry, ImportHouse};
pub use validator::{ImportValidator, ValidationReport};
