//! Credential traits: the narrow interfaces the session core consumes
//! for user lookup and password verification.

use async_trait::async_trait;

use crate::result::AppResult;

/// Backing store for stored credential hashes, keyed by identity.
///
/// The session core never sees full user records; it only needs the
/// password hash for an identity, or `None` if the identity is unknown.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Look up the stored password hash for an identity.
    async fn password_hash(&self, identity: &str) -> AppResult<Option<String>>;
}

/// Pluggable password verification capability.
///
/// Implementations compare a plaintext secret against a stored hash.
/// A mismatch is `Ok(false)`; errors are reserved for malformed hashes
/// or primitive failures.
pub trait CredentialVerifier: Send + Sync + std::fmt::Debug + 'static {
    /// Verify a plaintext secret against a stored hash.
    fn verify(&self, secret: &str, hash: &str) -> AppResult<bool>;
}
