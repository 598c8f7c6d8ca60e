//! Storage implementations.
//!
//! # Stores
//!
//! - [`JsonStore`] - one JSON document held in memory, optionally mirrored to a file

pub mod json_store;

pub use json_store::JsonStore;
