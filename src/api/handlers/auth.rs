//! Handlers for registration and login.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::application::services::RegisterInput;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new user account.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Errors
///
/// Returns 400 on field validation failure, 409 if the email or phone
/// is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    payload.validate()?;

    let user = state
        .auth_service
        .register(RegisterInput {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            password: payload.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}

/// Authenticates a user and issues a session token.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// Accepts either `email` or `phone` as the identifier; email wins if
/// both are supplied.
///
/// # Errors
///
/// Returns 400 if neither identifier is present, the password is
/// missing, or an identifier fails its shape check; 401 with a generic
/// message on any credential failure.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    if payload.email.is_none() && payload.phone.is_none() {
        return Err(AppError::bad_request(
            "Either email or phone is required",
            json!({}),
        ));
    }

    let Some(password) = payload.password else {
        return Err(AppError::bad_request("Password is required", json!({})));
    };

    let (token, user) = state
        .auth_service
        .login(payload.email, payload.phone, &password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user,
    }))
}
