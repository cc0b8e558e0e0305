//! # trafi-core
//!
//! Core crate for TrafiAuth. Contains the unified error system, configuration
//! schemas, and the traits the session core consumes (cache backend,
//! credential store, credential verifier).
//!
//! This crate has **no** internal dependencies on other TrafiAuth crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
