//! Business logic services
//!
//! Services encapsulate the authentication and profile workflows and
//! coordinate between repositories and the token utilities.

pub mod auth;
pub mod profile;

pub use auth::{AuthService, ClientInfo, LoginOutcome};
pub use profile::ProfileService;
