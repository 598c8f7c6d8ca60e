//! Core domain entities representing the business data model.
//!
//! Entities are plain serializable data structures. The persisted JSON layout
//! of a snapshot is exactly the serde representation of these types.
//!
//! # Entity Types
//!
//! - [`Link`] - A short code mapped to a destination, with routing extras
//! - [`ClickStats`] - Per-link click counters, daily history and raw records
//! - [`Settings`] - Default and custom display domains
//! - [`Snapshot`] - Every link plus settings, the unit of export/import
//!
//! # Design Pattern
//!
//! Separate structs describe writes:
//! - `NewLink` - For creating links
//! - `LinkPatch` - For partial updates

pub mod click;
pub mod link;
pub mod settings;

pub use click::{CLIENT_TIMESTAMP_KEY, ClickMetadata, ClickRecord, ClickStats, DailyCount};
pub use link::{Link, LinkPatch, NewLink, UtmParams, Variant};
pub use settings::{Settings, Snapshot};
