//! Utility functions for code generation and URL processing.
//!
//! This module provides helper functions used across the application:
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_normalizer`] - URL normalization and validation
//! - [`utm`] - UTM campaign parameter merging

pub mod code_generator;
pub mod url_normalizer;
pub mod utm;
