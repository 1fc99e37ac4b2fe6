//! Handlers for the `/auth` resource (register, login).

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use shelflife_core::error::CoreError;
use shelflife_db::models::user::{CreateUser, UserProfile};
use shelflife_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Minimum password length for registration.
const MIN_PASSWORD_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub display_name: Option<String>,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username_or_email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login response: a bearer token plus the user's profile.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub profile: UserProfile,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a user account. Username and email are stored lowercase-trimmed;
/// the password is stored only as an Argon2id hash.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    let username = normalize(&input.username);
    let email = normalize(&input.email);

    validate_registration(&username, &email, &input)?;

    // Uniqueness checks. The uq_ indexes catch the race between this check
    // and the insert, mapping to the same 409.
    if UserRepo::exists_by_username(&state.pool, &username).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already taken".into(),
        )));
    }
    if UserRepo::exists_by_email(&state.pool, &email).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::Internal(format!("Password hashing error: {e}")))?;

    let display_name = match input.display_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => username.clone(),
    };

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            email,
            password_hash,
            display_name,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/auth/login
///
/// Authenticate with username-or-email + password. An identifier containing
/// `@` is treated as an email, anything else as a username; both lookups are
/// case-insensitive. Unknown identifier and wrong password fail with the
/// identical message.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let identifier = input.username_or_email.trim();
    if identifier.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username/email and password are required".into(),
        )));
    }

    let identifier = identifier.to_lowercase();
    let user = if identifier.contains('@') {
        UserRepo::find_by_email(&state.pool, &identifier).await?
    } else {
        UserRepo::find_by_username(&state.pool, &identifier).await?
    }
    .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::Internal(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        token,
        profile: user.into(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lowercase-trimmed form used for both usernames and emails.
fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// The same error for an unknown identifier and a wrong password.
fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username/email or password".into(),
    ))
}

/// Field-level registration checks (inputs already normalized).
fn validate_registration(
    username: &str,
    email: &str,
    input: &RegisterRequest,
) -> Result<(), AppError> {
    let mut errors = BTreeMap::new();

    if username.is_empty() {
        errors.insert("username".to_string(), "Username is required".to_string());
    } else if !(3..=50).contains(&username.len()) {
        errors.insert(
            "username".to_string(),
            "Username must be between 3 and 50 characters".to_string(),
        );
    }

    if email.is_empty() {
        errors.insert("email".to_string(), "Email is required".to_string());
    } else if !email.contains('@') {
        errors.insert(
            "email".to_string(),
            "Email must be a valid email address".to_string(),
        );
    }

    if input.password.len() < MIN_PASSWORD_LEN {
        errors.insert(
            "password".to_string(),
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }

    if let Some(name) = &input.display_name {
        if name.len() > 100 {
            errors.insert(
                "displayName".to_string(),
                "Display name must be at most 100 characters".to_string(),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::FieldValidation(errors)))
    }
}
