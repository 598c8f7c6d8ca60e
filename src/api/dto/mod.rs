//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Request and response bodies use camelCase keys.

pub mod backup;
pub mod health;
pub mod links;
pub mod redirect;
pub mod settings;
pub mod stats;
