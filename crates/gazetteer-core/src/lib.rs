//! Core types and traits for the gazetteer city registry.
//!
//! This crate provides the domain model and the contracts shared by the
//! storage backends, the city service, and the HTTP gateway.

pub mod city;
pub mod directory;
pub mod error;
pub mod repository;

pub use city::{City, CityDraft};
pub use directory::CityDirectory;
pub use error::{DirectoryError, StorageError};
pub use repository::CityRepository;
