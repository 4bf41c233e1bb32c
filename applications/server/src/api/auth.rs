/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tally_core::types::{CreateUser, UserId};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

/// POST /api/register
///
/// Creates an account; the password is hashed before it reaches storage and
/// is never echoed back.
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    if req.password.is_empty() {
        return Err(ServerError::Validation("password is required".to_string()));
    }

    let password_hash = app_state.auth.hash_password(&req.password)?;
    let create = CreateUser {
        username: req.username.trim().to_string(),
        password_hash,
    };
    create.validate()?;

    // A duplicate username surfaces from storage as Conflict (409)
    let user = tally_storage::users::create(&app_state.pool, &create).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            username: user.username,
        }),
    ))
}

/// POST /api/login
///
/// Unknown username and wrong password produce the identical error, so the
/// response never confirms whether an account exists.
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = tally_storage::users::find_by_username(&app_state.pool, &req.username)
        .await?
        .ok_or(ServerError::InvalidCredentials)?;

    let password_hash = tally_storage::users::get_password_hash(&app_state.pool, &user.id)
        .await?
        .ok_or(ServerError::InvalidCredentials)?;

    if !app_state.auth.verify_password(&req.password, &password_hash)? {
        return Err(ServerError::InvalidCredentials);
    }

    let token = app_state.auth.create_token(&user.id, &user.username)?;

    Ok(Json(LoginResponse {
        token,
        username: user.username,
    }))
}
