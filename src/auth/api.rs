//! User API Endpoints
//! Mission: Registration, token issuance, and profile management

use crate::auth::digest::digest_password;
use crate::auth::jwt::{JwtService, TokenError};
use crate::auth::middleware::CurrentUser;
use crate::auth::models::{
    LoginRequest, RegisterRequest, UpdateCakeRequest, UpdateEmailRequest, UpdatePasswordRequest,
    User,
};
use crate::auth::user_store::{StoreError, UserStore};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Shared auth state: the repository and the token service, both constructed
/// at start-up and injected into every collaborator.
#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<UserStore>,
    pub jwt: Arc<JwtService>,
}

/// Register endpoint - POST /user/register
pub async fn register(
    State(state): State<AuthState>,
    Json(params): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    validate_register_params(&params)?;

    let user = User {
        email: params.email.clone(),
        password_digest: digest_password(&params.password),
        favorite_cake: params.favorite_cake,
    };
    state.users.add(&params.email, user)?;

    info!("🍰 Registered user: {}", params.email);
    Ok((StatusCode::CREATED, "registered").into_response())
}

/// Token issuance endpoint - POST /user/jwt
///
/// Unknown user and wrong password answer identically so the response does
/// not reveal which credential was bad.
pub async fn issue_token(
    State(state): State<AuthState>,
    Json(params): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let user = state
        .users
        .get(&params.email)
        .map_err(|_| ApiError::InvalidLogin)?;

    if digest_password(&params.password) != user.password_digest {
        warn!("❌ Failed login attempt: {}", params.email);
        return Err(ApiError::InvalidLogin);
    }

    let token = state.jwt.forge_token(&user)?;
    Ok((StatusCode::OK, token).into_response())
}

/// Favorite cake read - GET /user/favorite_cake (protected)
pub async fn get_cake(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Response {
    (StatusCode::OK, user.favorite_cake).into_response()
}

/// Favorite cake update - PUT /user/favorite_cake (protected)
pub async fn update_cake(
    State(state): State<AuthState>,
    Extension(CurrentUser(mut user)): Extension<CurrentUser>,
    Json(params): Json<UpdateCakeRequest>,
) -> Result<Response, ApiError> {
    validate_cake(&params.favorite_cake)?;

    let email = user.email.clone();
    user.favorite_cake = params.favorite_cake;
    state.users.update(&email, user)?;

    Ok((StatusCode::OK, "updated").into_response())
}

/// Email update - PUT /user/email (protected)
///
/// Rename-of-key is delete-then-add, not an atomic rekey: a crash between
/// the two steps loses the record, and concurrent readers may observe the
/// key briefly absent.
pub async fn update_email(
    State(state): State<AuthState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(params): Json<UpdateEmailRequest>,
) -> Result<Response, ApiError> {
    validate_email(&params.email)?;

    // Refuse the rename while the target key is taken; deleting first would
    // destroy the caller's record on an ordinary conflict.
    if state.users.get(&params.email).is_ok() {
        return Err(ApiError::Store(StoreError::AlreadyExists));
    }

    let mut moved = state.users.delete(&user.email)?;
    moved.email = params.email.clone();
    state.users.add(&params.email, moved)?;

    info!("📧 Renamed user: {} -> {}", user.email, params.email);
    Ok((StatusCode::OK, "updated").into_response())
}

/// Password update - PUT /user/password (protected)
pub async fn update_password(
    State(state): State<AuthState>,
    Extension(CurrentUser(mut user)): Extension<CurrentUser>,
    Json(params): Json<UpdatePasswordRequest>,
) -> Result<Response, ApiError> {
    validate_password(&params.password)?;

    let email = user.email.clone();
    user.password_digest = digest_password(&params.password);
    state.users.update(&email, user)?;

    Ok((StatusCode::OK, "updated").into_response())
}

/// Field validation failures; the message is the response body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password must be at least 8 characters")]
    PasswordTooShort,
    #[error("favorite cake field is empty")]
    EmptyCake,
    #[error("favorite cake must contain only alphabetic characters")]
    NonAlphabeticCake,
}

fn validate_register_params(params: &RegisterRequest) -> Result<(), ValidationError> {
    validate_email(&params.email)?;
    validate_password(&params.password)?;
    validate_cake(&params.favorite_cake)
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || email.contains(char::is_whitespace)
    {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < 8 {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

fn validate_cake(cake: &str) -> Result<(), ValidationError> {
    if cake.is_empty() {
        return Err(ValidationError::EmptyCake);
    }
    if !cake.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::NonAlphabeticCake);
    }
    Ok(())
}

/// User API errors. Every variant maps to one status and one plain-text
/// body; repository and token errors are never swallowed on the way here.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    Store(StoreError),
    Token(TokenError),
    InvalidLogin,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::Token(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            ApiError::Store(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            ApiError::Token(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            ApiError::InvalidLogin => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid login params".to_string(),
            ),
        };

        (status, message).into_response()
    }
}
