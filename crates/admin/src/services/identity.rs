//! Session token verification.
//!
//! The identity provider signs HS256 JWTs whose `sub` claim is the user id.
//! This service only verifies them; [`IdentityVerifier::issue`] exists for
//! the development CLI and tests, which need tokens without a running
//! provider.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use catalog_admin_core::{UserId, UserIdError};

/// Errors from token verification or issuance.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Signature, expiry, issuer or format check failed.
    #[error("invalid session token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// The `sub` claim is not a usable user id.
    #[error("invalid subject: {0}")]
    InvalidSubject(#[from] UserIdError),
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issued at, seconds since the Unix epoch.
    #[serde(default)]
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Verifies session tokens signed with a shared HS256 key.
#[derive(Clone)]
pub struct IdentityVerifier {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
    issuer: Option<String>,
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier")
            .field("key", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl IdentityVerifier {
    /// Create a verifier for the given key. When `issuer` is set, tokens must
    /// carry a matching `iss` claim.
    #[must_use]
    pub fn new(secret: &SecretString, issuer: Option<String>) -> Self {
        let key = secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(iss) = &issuer {
            // A missing `iss` claim would otherwise skip the issuer check.
            validation.set_required_spec_claims(&["exp", "sub", "iss"]);
            validation.set_issuer(&[iss]);
        } else {
            validation.set_required_spec_claims(&["exp", "sub"]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(key),
            encoding_key: EncodingKey::from_secret(key),
            validation,
            issuer,
        }
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if the token is malformed, expired, signed
    /// with another key, has the wrong issuer, or has a blank subject.
    pub fn verify(&self, token: &str) -> Result<UserId, IdentityError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(UserId::parse(&data.claims.sub)?)
    }

    /// Sign a token for `user_id` valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidToken` if signing fails.
    pub fn issue(&self, user_id: &UserId, ttl: Duration) -> Result<String, IdentityError> {
        let now = Utc::now().timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: user_id.as_str().to_owned(),
            exp: now.saturating_add(ttl_secs),
            iat: now,
            iss: self.issuer.clone(),
        };
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    fn user() -> UserId {
        UserId::parse("user_2NNEqL2nrIRdJ194ndJqAHwEfxC").unwrap()
    }

    #[test]
    fn test_issue_then_verify() {
        let verifier = IdentityVerifier::new(&secret("k3Y!9vQz#Lm2@Xr8$Tp5^Wn7&Hb4*Jc6"), None);
        let token = verifier.issue(&user(), Duration::from_secs(300)).unwrap();
        assert_eq!(verifier.verify(&token).unwrap(), user());
    }

    #[test]
    fn test_rejects_other_key() {
        let issuer = IdentityVerifier::new(&secret("first-key-aB3$xY9!mK2@nL5#pQ7&rT0"), None);
        let verifier = IdentityVerifier::new(&secret("other-key-Zc6^uW4*rT0&pQ7#nL5@mK2"), None);
        let token = issuer.issue(&user(), Duration::from_secs(300)).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(IdentityError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_rejects_expired() {
        let verifier = IdentityVerifier::new(&secret("k3Y!9vQz#Lm2@Xr8$Tp5^Wn7&Hb4*Jc6"), None);
        let claims = Claims {
            sub: "user_1".to_string(),
            exp: Utc::now().timestamp() - 3600,
            iat: Utc::now().timestamp() - 7200,
            iss: None,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"k3Y!9vQz#Lm2@Xr8$Tp5^Wn7&Hb4*Jc6"),
        )
        .unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_enforces_issuer_when_configured() {
        let key = secret("k3Y!9vQz#Lm2@Xr8$Tp5^Wn7&Hb4*Jc6");
        let untagged = IdentityVerifier::new(&key, None);
        let strict = IdentityVerifier::new(&key, Some("https://id.example.test".to_string()));

        let token = untagged.issue(&user(), Duration::from_secs(300)).unwrap();
        assert!(strict.verify(&token).is_err());

        let token = strict.issue(&user(), Duration::from_secs(300)).unwrap();
        assert_eq!(strict.verify(&token).unwrap(), user());
    }

    #[test]
    fn test_rejects_wrong_issuer() {
        let key = secret("k3Y!9vQz#Lm2@Xr8$Tp5^Wn7&Hb4*Jc6");
        let elsewhere =
            IdentityVerifier::new(&key, Some("https://other.example.test".to_string()));
        let strict = IdentityVerifier::new(&key, Some("https://id.example.test".to_string()));

        let token = elsewhere.issue(&user(), Duration::from_secs(300)).unwrap();
        assert!(matches!(
            strict.verify(&token),
            Err(IdentityError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        let verifier = IdentityVerifier::new(&secret("k3Y!9vQz#Lm2@Xr8$Tp5^Wn7&Hb4*Jc6"), None);
        assert!(verifier.verify("not.a.jwt").is_err());
    }
}
