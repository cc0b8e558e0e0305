//! Traits consumed by the session core.

pub mod cache;
pub mod credentials;

pub use cache::CacheProvider;
pub use credentials::{CredentialStore, CredentialVerifier};
