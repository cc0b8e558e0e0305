//! Session lifecycle manager: login, validate, refresh, and revoke flows.
//!
//! The manager is stateless between calls; all cross-request state lives in
//! the session store, and the signing secret lives in the token codec. Two
//! concurrent logins for one identity race on the final store write and the
//! last write wins: a refresh racing such a login may fail with a mismatch,
//! which is correct behavior.

use std::sync::Arc;

use tracing::{debug, info, warn};

use trafi_core::error::AppError;
use trafi_core::traits::{CredentialStore, CredentialVerifier};

use crate::token::codec::{IssuedToken, TokenPair};
use crate::token::{Claims, TokenCodec};

use super::store::SessionStore;

/// Orchestrates the token codec, session store, and credential
/// collaborators into the login / validate / refresh protocol.
#[derive(Clone)]
pub struct SessionManager {
    /// Token creation and validation.
    codec: TokenCodec,
    /// Refresh-token persistence.
    store: SessionStore,
    /// Backing store for credential hashes (login only).
    credentials: Arc<dyn CredentialStore>,
    /// Password verification capability (login only).
    verifier: Arc<dyn CredentialVerifier>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("codec", &self.codec)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required collaborators.
    pub fn new(
        codec: TokenCodec,
        store: SessionStore,
        credentials: Arc<dyn CredentialStore>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            codec,
            store,
            credentials,
            verifier,
        }
    }

    /// Performs the complete login flow:
    ///
    /// 1. Look up the stored credential hash for the identity
    /// 2. Verify the password against it
    /// 3. Issue the access + refresh token pair
    /// 4. Persist the refresh token before the success is observable,
    ///    so an immediate refresh never finds a missing record
    ///
    /// Unknown identity and wrong password both collapse to
    /// `InvalidCredentials` externally; the log entries stay distinct.
    /// No token is ever issued before verification completes.
    pub async fn login(&self, identity: &str, password: &str) -> Result<TokenPair, AppError> {
        let hash = self.credentials.password_hash(identity).await?;

        let Some(hash) = hash else {
            debug!(identity, "Login rejected: unknown identity");
            return Err(AppError::invalid_credentials("Unknown identity"));
        };

        if !self.verifier.verify(password, &hash)? {
            debug!(identity, "Login rejected: password mismatch");
            return Err(AppError::invalid_credentials("Password mismatch"));
        }

        let tokens = self.codec.issue_pair(identity)?;

        self.store
            .put(identity, &tokens.refresh_token, self.codec.refresh_ttl())
            .await?;

        info!(identity, "Login successful");
        Ok(tokens)
    }

    /// Validates a presented access token and returns its claims.
    ///
    /// Purely codec-based: no session store consultation. An access token
    /// stays valid until its natural expiry even after a revoke.
    pub fn validate(&self, bearer: &str) -> Result<Claims, AppError> {
        let claims = self.codec.parse(bearer)?;

        if claims.sub.is_empty() {
            debug!("Token rejected: empty subject claim");
            return Err(AppError::unauthorized("Token subject missing"));
        }

        Ok(claims)
    }

    /// Exchanges a valid refresh token for a new access token:
    ///
    /// 1. Parse the refresh token (signature + expiry)
    /// 2. Fetch the stored record for its subject
    /// 3. Compare stored and presented tokens byte-for-byte; once a newer
    ///    refresh token has been issued for the identity, the old one is
    ///    permanently rejected even though its own signature and expiry
    ///    are still valid
    /// 4. Issue a fresh access token
    ///
    /// Missing record, store error, and mismatch are indistinguishable to
    /// the caller (`Unauthorized`); each is logged distinctly.
    pub async fn refresh(&self, refresh_token: &str) -> Result<IssuedToken, AppError> {
        let claims = self.codec.parse(refresh_token)?;
        let identity = claims.sub.as_str();

        let stored = match self.store.get(identity).await {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                debug!(identity, "Refresh rejected: no live session record");
                return Err(AppError::unauthorized("No session record"));
            }
            Err(e) => {
                warn!(identity, error = %e, "Refresh rejected: session store failure");
                return Err(AppError::unauthorized("Session store unavailable"));
            }
        };

        if stored.as_bytes() != refresh_token.as_bytes() {
            debug!(identity, "Refresh rejected: token superseded");
            return Err(AppError::unauthorized("Refresh token superseded"));
        }

        let access = self.codec.issue_access(identity)?;
        info!(identity, "Access token refreshed");
        Ok(access)
    }

    /// Revokes the session record for an identity.
    ///
    /// Subsequent refreshes fail until the next login; already-issued
    /// access tokens keep working until their natural expiry.
    pub async fn revoke(&self, identity: &str) -> Result<(), AppError> {
        self.store.delete(identity).await?;
        info!(identity, "Session revoked");
        Ok(())
    }
}
