//! City directory service implementation.
//!
//! This crate provides the `CityDirectory` implementation that owns the
//! registry's validation and deduplication invariants. Core types and traits
//! are re-exported from `gazetteer_core`.

pub mod service;

pub use gazetteer_core::{City, CityDirectory, CityDraft, DirectoryError};
pub use service::CityService;
