//! HTTP gateway for the gazetteer city registry.
//!
//! Exposes the CRUD and lookup routes plus the bulk CSV import endpoint,
//! mapping wire DTOs and service errors onto HTTP.

pub mod app;
pub mod cli;
pub mod csvio;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
