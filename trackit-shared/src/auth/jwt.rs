/// Session tokens
///
/// Tokens are HS256-signed JWTs issued on registration and login. They carry
/// the user's id as `sub` plus the email and username so handlers can log who
/// is calling without a lookup.
///
/// ```
/// use trackit_shared::auth::jwt::{create_token, validate_token, Claims};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let claims = Claims::new(user_id, "sam@example.com", "sam", Duration::hours(24));
/// let token = create_token(&claims, "a-secret-of-at-least-thirty-two-bytes")?;
///
/// let decoded = validate_token(&token, "a-secret-of-at-least-thirty-two-bytes")?;
/// assert_eq!(decoded.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value of the `iss` claim
pub const ISSUER: &str = "trackit";

/// Default session lifetime
pub const DEFAULT_TTL_HOURS: i64 = 24;

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to create token: {0}")]
    CreateError(String),

    #[error("Token has expired")]
    Expired,

    #[error("Token was not issued by trackit")]
    InvalidIssuer,

    #[error("Failed to validate token: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,

    pub iss: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,

    pub email: String,
    pub username: String,
}

impl Claims {
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        username: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + ttl).timestamp(),
            email: email.into(),
            username: username.into(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::CreateError(e.to_string()))
}

/// Checks signature, issuer, `exp` and `nbf`, then returns the claims
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_nbf = true;
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
            _ => JwtError::ValidationError(e.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn claims(ttl: Duration) -> Claims {
        Claims::new(Uuid::new_v4(), "sam@example.com", "sam", ttl)
    }

    #[test]
    fn test_round_trip_preserves_identity() {
        let original = claims(Duration::hours(DEFAULT_TTL_HOURS));
        let token = create_token(&original, SECRET).unwrap();

        let decoded = validate_token(&token, SECRET).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.iss, "trackit");
        assert!(!decoded.is_expired());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(&claims(Duration::hours(1)), SECRET).unwrap();

        assert!(matches!(
            validate_token(&token, "some-other-secret-that-is-long-enough"),
            Err(JwtError::ValidationError(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let expired = claims(Duration::seconds(-3600));
        assert!(expired.is_expired());

        let token = create_token(&expired, SECRET).unwrap();
        assert!(matches!(validate_token(&token, SECRET), Err(JwtError::Expired)));
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let mut foreign = claims(Duration::hours(1));
        foreign.iss = "someone-else".to_string();
        let token = create_token(&foreign, SECRET).unwrap();

        assert!(matches!(validate_token(&token, SECRET), Err(JwtError::InvalidIssuer)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(validate_token("not.a.jwt", SECRET).is_err());
    }
}
