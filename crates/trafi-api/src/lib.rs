//! # trafi-api
//!
//! HTTP API layer for TrafiAuth built on Axum.
//!
//! Provides the REST endpoints (register, login, validate, refresh,
//! logout, health), the bearer-token extractor, cookie handling, DTOs,
//! and error mapping.

pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
