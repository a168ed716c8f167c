//! Registration and login handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::auth::create_token;
use crate::dto::users::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};
use crate::error::ApiError;
use crate::AppState;

/// Lecturer self-registration; the account stays inert until HR approves it
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    request.validate()?;

    let user = state
        .directory
        .register(&request.name, &request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: user.into(),
            message: "Your lecturer account has been created and sent to HR for approval. \
                      You will be able to log in once HR activates your profile."
                .to_string(),
        }),
    ))
}

/// Verifies credentials for the claimed role and issues a session token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .directory
        .authenticate(&request.email, &request.password, request.role)
        .await?;

    let token = create_token(&user, &state.config.jwt_secret, state.config.jwt_expiration_secs)?;

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}
