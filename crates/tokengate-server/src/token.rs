//! Signed-token codec.
//!
//! A [`TokenCodec`] signs and verifies compact HS256 tokens carrying an
//! arbitrary payload plus `jti` / `iat` / `exp` claims. The server holds
//! two independently keyed instances — one for access tokens, one for
//! refresh tokens — so a token of one kind can never verify under the
//! other's secret.

use std::time::{Duration, SystemTime};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Token kinds and errors
// ---------------------------------------------------------------------------

/// Which of the two token families a codec instance issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived bearer credential for protected resources.
    Access,
    /// Long-lived credential used solely to mint new access tokens.
    Refresh,
}

/// Verification / issuance failures.
///
/// Callers outside this module must collapse these into a single opaque
/// authentication failure before anything reaches an untrusted client;
/// the distinction exists for internal logging only.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    /// The signature does not match this codec's secret.
    #[error("signature verification failed")]
    InvalidSignature,

    /// The token's `exp` claim is in the past.
    #[error("token expired")]
    Expired,

    /// The token is not structurally a valid signed token.
    #[error("malformed token")]
    Malformed,
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

/// Standard claims wrapped around a caller-supplied payload.
///
/// The payload is flattened, so a [`Principal`](tokengate_models::Principal)
/// payload produces `{id, email, name, jti, iat, exp}` on the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims<T> {
    /// Caller payload, flattened into the claim set.
    #[serde(flatten)]
    pub payload: T,
    /// Unique token id.
    pub jti: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: u64,
    /// Absolute expiry, seconds since the Unix epoch.
    pub exp: u64,
}

// ---------------------------------------------------------------------------
// TokenCodec
// ---------------------------------------------------------------------------

/// Signs and verifies tokens of one [`TokenKind`] with one secret and TTL.
pub struct TokenCodec {
    kind: TokenKind,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    /// Build a codec from a shared secret and token lifetime.
    pub fn new(kind: TokenKind, secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::default();
        // Exact expiry; the default 60s leeway would let expired tokens
        // through the request gate for a full minute.
        validation.leeway = 0;

        Self {
            kind,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// The kind of token this codec issues.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Lifetime stamped into issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token carrying `payload`, expiring `ttl` from now.
    pub fn issue<T: Serialize>(&self, payload: &T) -> Result<String, TokenError> {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .expect("system clock before epoch")
            .as_secs();

        let claims = Claims {
            payload,
            jti: uuid::Uuid::new_v4().to_string(),
            iat: now,
            exp: now + self.ttl.as_secs(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            tracing::error!(kind = %self.kind, cause = %e, "token encoding failed");
            TokenError::Malformed
        })
    }

    /// Verify signature and expiry, returning the full claim set.
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<Claims<T>, TokenError> {
        let data = decode::<Claims<T>>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;
        Ok(data.claims)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokengate_models::Principal;

    fn jane() -> Principal {
        Principal {
            id: 1,
            email: "jane@example.com".into(),
            name: "Jane".into(),
        }
    }

    fn access_codec(secret: &str) -> TokenCodec {
        TokenCodec::new(TokenKind::Access, secret, Duration::from_secs(900))
    }

    #[test]
    fn round_trip_within_ttl() {
        let codec = access_codec("access-secret");
        let token = codec.issue(&jane()).unwrap();
        let claims: Claims<Principal> = codec.verify(&token).unwrap();
        assert_eq!(claims.payload, jane());
    }

    #[test]
    fn expiry_matches_ttl() {
        let codec = access_codec("access-secret");
        let token = codec.issue(&jane()).unwrap();
        let claims: Claims<Principal> = codec.verify(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn expired_token_rejected() {
        let codec = access_codec("access-secret");

        // Hand-craft claims already past their expiry.
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            payload: jane(),
            jti: "test".into(),
            iat: now - 1000,
            exp: now - 100,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"access-secret"),
        )
        .unwrap();

        let err = codec.verify::<Principal>(&token).unwrap_err();
        assert_eq!(err, TokenError::Expired);
    }

    #[test]
    fn cross_secret_rejected() {
        let access = access_codec("access-secret");
        let refresh =
            TokenCodec::new(TokenKind::Refresh, "refresh-secret", Duration::from_secs(900));

        let token = access.issue(&jane()).unwrap();
        let err = refresh.verify::<Principal>(&token).unwrap_err();
        assert_eq!(err, TokenError::InvalidSignature);

        let token = refresh.issue(&jane()).unwrap();
        let err = access.verify::<Principal>(&token).unwrap_err();
        assert_eq!(err, TokenError::InvalidSignature);
    }

    #[test]
    fn garbage_rejected_as_malformed() {
        let codec = access_codec("access-secret");
        let err = codec.verify::<Principal>("not-a-token").unwrap_err();
        assert_eq!(err, TokenError::Malformed);
    }

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(TokenKind::Access.to_string(), "access");
        assert_eq!(TokenKind::Refresh.to_string(), "refresh");
    }
}
