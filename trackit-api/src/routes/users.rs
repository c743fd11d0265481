/// Account endpoints
///
/// # Endpoints
///
/// - `POST /api/users/register` - Create an account and get a session token
/// - `POST /api/users/login` - Exchange email-or-username and password for a token
/// - `GET /api/users/me` - Profile of the authenticated caller

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use trackit_shared::{
    auth::{
        jwt::{self, Claims},
        middleware::AuthContext,
        password,
    },
    models::user::{CreateUser, User, UserProfile},
};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 50, message = "Username is required (at most 50 characters)"),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email or username
    #[validate(length(min = 1, message = "Email or username is required"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Usernames never contain `@`, so a login identifier cannot match both an
/// email and a username
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.contains('@') {
        let mut error = ValidationError::new("username_at_sign");
        error.message = Some("Username must not contain '@'".into());
        return Err(error);
    }
    Ok(())
}

/// Public identity returned alongside a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&User> for AccountSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub message: String,
    pub user: AccountSummary,
    pub token: String,
}

fn issue_token(state: &AppState, user: &User) -> ApiResult<String> {
    let ttl = Duration::hours(state.config.jwt.expiration_hours);
    let claims = Claims::new(user.id, &user.email, &user.username, ttl);
    Ok(jwt::create_token(&claims, state.jwt_secret())?)
}

/// Register a new account
///
/// ```text
/// POST /api/users/register
/// { "username": "sam", "email": "sam@example.com", "password": "..." }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Email already exists / Username already exists
/// - `422 Unprocessable Entity`: Missing or malformed fields
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    req.validate()?;

    let email = req.email.trim().to_lowercase();
    let username = req.username.trim().to_string();

    // A racing insert still trips users_email_key / users_username_key
    if User::email_exists(&state.db, &email).await? {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }
    if User::username_exists(&state.db, &username).await? {
        return Err(ApiError::Conflict("Username already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username,
            email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    let token = issue_token(&state, &user)?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            message: "User created successfully".to_string(),
            user: AccountSummary::from(&user),
            token,
        }),
    ))
}

/// Log in with email or username
///
/// # Errors
///
/// - `401 Unauthorized`: Account does not exist / Password does not match account
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    req.validate()?;

    let user = User::find_by_identifier(&state.db, req.identifier.trim())
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account does not exist".to_string()))?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "Rejected login with wrong password");
        return Err(ApiError::Unauthorized(
            "Password does not match account".to_string(),
        ));
    }

    tracing::info!(user_id = %user.id, "User logged in");

    let token = issue_token(&state, &user)?;

    Ok(Json(SessionResponse {
        message: "Login successful".to_string(),
        user: AccountSummary::from(&user),
        token,
    }))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserProfile>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}
