//! # trafi-entity
//!
//! Domain entity models for TrafiAuth.

pub mod user;

pub use user::{CreateUser, User};
