//! Token codec: creates and parses signed, expiring bearer tokens.
//!
//! The codec is stateless: it holds the process signing secret and the
//! configured lifetimes, nothing else. Any process instance holding the
//! same secret can validate a token without a store round trip.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use trafi_core::config::AuthConfig;
use trafi_core::error::AppError;

use super::claims::Claims;

/// Creates and validates signed bearer tokens.
#[derive(Clone)]
pub struct TokenCodec {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration (HS256 only, no leeway).
    validation: Validation,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// A freshly issued token with its absolute expiry.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// The signed token string.
    pub token: String,
    /// Absolute expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenCodec {
    /// Creates a new codec from auth configuration.
    ///
    /// The secret is threaded in explicitly so tests can construct codecs
    /// with distinct secrets; nothing reads ambient global state.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            access_ttl: Duration::minutes(config.jwt_access_ttl_minutes as i64),
            refresh_ttl: Duration::hours(config.jwt_refresh_ttl_hours as i64),
        }
    }

    /// Refresh token lifetime as a std `Duration`, for store TTLs.
    pub fn refresh_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_ttl.num_seconds().max(0) as u64)
    }

    /// Issues a signed token for `subject` expiring after `lifetime`.
    pub fn issue(&self, subject: &str, lifetime: Duration) -> Result<IssuedToken, AppError> {
        if subject.is_empty() {
            return Err(AppError::token_issuance(
                "Refusing to issue a token for an empty subject",
            ));
        }

        let now = Utc::now();
        let expires_at = now + lifetime;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::token_issuance(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Issues a short-lived access token (e.g., after refresh).
    pub fn issue_access(&self, subject: &str) -> Result<IssuedToken, AppError> {
        self.issue(subject, self.access_ttl)
    }

    /// Generates a new access + refresh token pair for the given identity.
    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, AppError> {
        let access = self.issue(subject, self.access_ttl)?;
        let refresh = self.issue(subject, self.refresh_ttl)?;

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            access_expires_at: access.expires_at,
            refresh_expires_at: refresh.expires_at,
        })
    }

    /// Verifies and decodes a token string.
    ///
    /// Checks, in order:
    /// 1. The signing algorithm is HS256 (anything else is rejected,
    ///    defending against algorithm confusion)
    /// 2. The signature verifies against the codec's secret
    /// 3. The token has not expired; expiry is exclusive, so a token is
    ///    rejected the instant the clock reaches `exp`
    ///
    /// All failures map to `Unauthorized`; the internal reason stays in
    /// the error message for server-side logs only.
    pub fn parse(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                debug!(error = %e, "Token rejected by codec");
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                        AppError::unauthorized("Unexpected signing algorithm")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Malformed token")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        let claims = token_data.claims;

        // jsonwebtoken treats exp == now as still valid; the protocol
        // requires the boundary itself to be expired.
        if claims.is_expired() {
            debug!(subject = %claims.sub, "Token rejected: expired at boundary");
            return Err(AppError::unauthorized("Token has expired"));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use trafi_core::error::ErrorKind;

    fn codec_with_secret(secret: &str) -> TokenCodec {
        TokenCodec::new(&AuthConfig::for_tests(secret))
    }

    #[test]
    fn test_issue_then_parse_roundtrip() {
        let codec = codec_with_secret("secret-a");
        let issued = codec.issue("a@x.com", Duration::minutes(15)).unwrap();
        let claims = codec.parse(&issued.token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_pair_has_distinct_tokens_and_lifetimes() {
        let codec = codec_with_secret("secret-a");
        let pair = codec.issue_pair("a@x.com").unwrap();
        assert_ne!(pair.access_token, pair.refresh_token);
        assert!(pair.refresh_expires_at > pair.access_expires_at);
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let codec_a = codec_with_secret("secret-a");
        let codec_b = codec_with_secret("secret-b");
        let issued = codec_a.issue("a@x.com", Duration::minutes(15)).unwrap();
        let err = codec_b.parse(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_expired_token_rejected() {
        let codec = codec_with_secret("secret-a");
        let issued = codec.issue("a@x.com", Duration::minutes(-5)).unwrap();
        let err = codec.parse(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let codec = codec_with_secret("secret-a");
        let issued = codec.issue("a@x.com", Duration::zero()).unwrap();
        assert!(codec.parse(&issued.token).is_err());
    }

    #[test]
    fn test_malformed_token_rejected() {
        let codec = codec_with_secret("secret-a");
        let err = codec.parse("not-a-jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_other_hmac_algorithm_rejected() {
        let codec = codec_with_secret("secret-a");
        let now = Utc::now();
        let claims = Claims {
            sub: "a@x.com".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(15)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"secret-a"),
        )
        .unwrap();
        let err = codec.parse(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_unsigned_token_rejected() {
        let codec = codec_with_secret("secret-a");
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let header = engine.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let exp = (Utc::now() + Duration::minutes(15)).timestamp();
        let payload = engine.encode(
            serde_json::json!({"sub": "a@x.com", "iat": 0, "exp": exp}).to_string(),
        );
        let token = format!("{header}.{payload}.");
        assert!(codec.parse(&token).is_err());
    }

    #[test]
    fn test_empty_subject_refused() {
        let codec = codec_with_secret("secret-a");
        let err = codec.issue("", Duration::minutes(15)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenIssuance);
    }
}
