//! Protocol tests for the session manager: login, validate, refresh,
//! rotation invalidation, and revocation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use trafi_cache::memory::MemoryCacheProvider;
use trafi_cache::provider::CacheManager;
use trafi_core::config::AuthConfig;
use trafi_core::config::cache::MemoryCacheConfig;
use trafi_core::error::ErrorKind;
use trafi_core::result::AppResult;
use trafi_core::traits::{CredentialStore, CredentialVerifier};
use trafi_session::password::PasswordHasher;
use trafi_session::session::{SessionManager, SessionStore};
use trafi_session::token::TokenCodec;

/// Fixed identity → password hash map standing in for the user database.
#[derive(Debug, Default)]
struct StaticCredentials(HashMap<String, String>);

#[async_trait]
impl CredentialStore for StaticCredentials {
    async fn password_hash(&self, identity: &str) -> AppResult<Option<String>> {
        Ok(self.0.get(identity).cloned())
    }
}

fn make_manager(users: &[(&str, &str)]) -> SessionManager {
    let hasher = PasswordHasher::new();
    let credentials: HashMap<String, String> = users
        .iter()
        .map(|(identity, password)| {
            (
                identity.to_string(),
                hasher.hash_password(password).unwrap(),
            )
        })
        .collect();

    let config = AuthConfig::for_tests("protocol-test-secret");
    let provider = MemoryCacheProvider::new(&MemoryCacheConfig {
        max_capacity: 100,
        time_to_live_seconds: 86400,
    });
    let cache = Arc::new(CacheManager::from_provider(Arc::new(provider)));

    let verifier: Arc<dyn CredentialVerifier> = Arc::new(hasher);
    SessionManager::new(
        TokenCodec::new(&config),
        SessionStore::new(cache, &config),
        Arc::new(StaticCredentials(credentials)),
        verifier,
    )
}

#[tokio::test]
async fn test_login_returns_validatable_pair() {
    let manager = make_manager(&[("a@x.com", "pw1")]);

    let pair = manager.login("a@x.com", "pw1").await.unwrap();
    assert!(pair.refresh_expires_at > pair.access_expires_at);

    let claims = manager.validate(&pair.access_token).unwrap();
    assert_eq!(claims.sub, "a@x.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let manager = make_manager(&[("a@x.com", "pw1")]);
    let err = manager.login("a@x.com", "wrong").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCredentials);
}

#[tokio::test]
async fn test_login_unknown_identity_same_category() {
    let manager = make_manager(&[("a@x.com", "pw1")]);
    let err = manager.login("nobody@x.com", "pw1").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCredentials);
}

#[tokio::test]
async fn test_refresh_yields_new_access_token() {
    let manager = make_manager(&[("a@x.com", "pw1")]);
    let pair = manager.login("a@x.com", "pw1").await.unwrap();

    let access = manager.refresh(&pair.refresh_token).await.unwrap();
    assert_eq!(manager.validate(&access.token).unwrap().sub, "a@x.com");
}

#[tokio::test]
async fn test_refresh_with_access_token_fails() {
    // An access token parses fine but no session record matches it.
    let manager = make_manager(&[("a@x.com", "pw1")]);
    let pair = manager.login("a@x.com", "pw1").await.unwrap();

    let err = manager.refresh(&pair.access_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_refresh_without_login_fails() {
    let manager = make_manager(&[("a@x.com", "pw1")]);
    let codec = TokenCodec::new(&AuthConfig::for_tests("protocol-test-secret"));
    let orphan = codec.issue("a@x.com", chrono::Duration::hours(24)).unwrap();

    let err = manager.refresh(&orphan.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_foreign_secret_refresh_token_rejected() {
    let manager = make_manager(&[("a@x.com", "pw1")]);
    manager.login("a@x.com", "pw1").await.unwrap();

    let foreign_codec = TokenCodec::new(&AuthConfig::for_tests("some-other-secret"));
    let forged = foreign_codec
        .issue("a@x.com", chrono::Duration::hours(24))
        .unwrap();

    let err = manager.refresh(&forged.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_second_login_rotates_out_first_refresh_token() {
    let manager = make_manager(&[("a@x.com", "pw1")]);

    let first = manager.login("a@x.com", "pw1").await.unwrap();
    manager.refresh(&first.refresh_token).await.unwrap();

    let second = manager.login("a@x.com", "pw1").await.unwrap();

    let err = manager.refresh(&first.refresh_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    manager.refresh(&second.refresh_token).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_reusable_until_superseded() {
    let manager = make_manager(&[("a@x.com", "pw1")]);
    let pair = manager.login("a@x.com", "pw1").await.unwrap();

    let first = manager.refresh(&pair.refresh_token).await.unwrap();
    let second = manager.refresh(&pair.refresh_token).await.unwrap();
    assert_eq!(manager.validate(&second.token).unwrap().sub, "a@x.com");
    let _ = first;
}

#[tokio::test]
async fn test_sessions_are_independent_per_identity() {
    let manager = make_manager(&[("a@x.com", "pw1"), ("b@x.com", "pw2")]);

    let pair_a = manager.login("a@x.com", "pw1").await.unwrap();
    let pair_b = manager.login("b@x.com", "pw2").await.unwrap();

    // b's login must not disturb a's session record.
    manager.refresh(&pair_a.refresh_token).await.unwrap();
    manager.refresh(&pair_b.refresh_token).await.unwrap();
}

#[tokio::test]
async fn test_revoke_invalidates_refresh() {
    let manager = make_manager(&[("a@x.com", "pw1")]);
    let pair = manager.login("a@x.com", "pw1").await.unwrap();

    manager.revoke("a@x.com").await.unwrap();

    let err = manager.refresh(&pair.refresh_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    // Access tokens stay self-contained until natural expiry.
    assert!(manager.validate(&pair.access_token).is_ok());
}

#[tokio::test]
async fn test_validate_rejects_garbage() {
    let manager = make_manager(&[]);
    let err = manager.validate("garbage").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}
