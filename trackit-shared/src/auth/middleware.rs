/// Bearer-token authentication for axum
///
/// [`authenticate_bearer`] turns an `Authorization: Bearer <jwt>` header into
/// an [`AuthContext`]. The API's auth layer inserts that context into request
/// extensions, and handlers read it back with `Extension<AuthContext>`:
///
/// ```
/// use axum::Extension;
/// use trackit_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {}", auth.username)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, Claims, JwtError};

/// Identity of the caller for the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            username: claims.username,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing credentials")]
    MissingCredentials,

    #[error("{0}")]
    InvalidFormat(String),

    #[error("{0}")]
    InvalidToken(String),
}

/// Validates the bearer token in `headers`
pub fn authenticate_bearer(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
        other => AuthError::InvalidToken(format!("Invalid token: {}", other)),
    })?;

    Ok(AuthContext::from(claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::create_token;
    use axum::http::HeaderValue;
    use chrono::Duration;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_valid_bearer_token() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "sam@example.com", "sam", Duration::hours(1));
        let token = create_token(&claims, SECRET).unwrap();

        let auth = authenticate_bearer(&headers_with(&format!("Bearer {}", token)), SECRET).unwrap();
        assert_eq!(auth.user_id, user_id);
        assert_eq!(auth.username, "sam");
        assert_eq!(auth.email, "sam@example.com");
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            authenticate_bearer(&HeaderMap::new(), SECRET),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_non_bearer_scheme() {
        assert!(matches!(
            authenticate_bearer(&headers_with("Basic c2FtOnB3"), SECRET),
            Err(AuthError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_expired_token_reported() {
        let claims = Claims::new(Uuid::new_v4(), "a@b.c", "a", Duration::seconds(-10));
        let token = create_token(&claims, SECRET).unwrap();

        let err = authenticate_bearer(&headers_with(&format!("Bearer {}", token)), SECRET).unwrap_err();
        assert_eq!(err.to_string(), "Token expired");
    }
}
