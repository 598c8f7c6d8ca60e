//! Domain layer containing business entities and logic.
//!
//! Entities, repository interfaces and pure business rules, independent of
//! storage and HTTP concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage port trait definitions
//! - [`ab_test`] - Weighted variant selection and validation
//! - [`analytics`] - Rolling window, daily rollup and retention rules
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler resolves a code and picks a variant
//! 2. A [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] applies it with retry on conflicts
//! 4. Updated statistics are saved through [`repositories::LinkRepository`]

pub mod ab_test;
pub mod analytics;
pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
