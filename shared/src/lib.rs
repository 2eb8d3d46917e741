//! Campus Connect Shared Library
//!
//! Wire types, domain enums and validation shared between the backend
//! and any future client crates.

pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use models::*;
pub use types::*;
