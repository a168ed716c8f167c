//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use core_kernel::{Role, UserId};
use domain_claims::Actor;

use crate::AppState;

/// The authenticated actor attached to every protected request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub role: Role,
    pub email: String,
}

impl CurrentUser {
    /// The core-facing actor identity
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.id,
            role: self.role,
            email: self.email.clone(),
        }
    }
}

/// Refuses actors whose role does not match a role-gated view
pub fn require_role(user: &CurrentUser, required: Role) -> Result<(), crate::error::ApiError> {
    if user.role != required {
        return Err(crate::error::ApiError::Forbidden(format!(
            "this view requires the {required} role"
        )));
    }
    Ok(())
}

/// Authentication middleware
///
/// Validates the bearer token and injects [`CurrentUser`] into the request
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            warn!("Missing or invalid Authorization header");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    let claims = match crate::auth::validate_token(token, &state.config.jwt_secret) {
        Ok(claims) => claims,
        Err(e) => {
            warn!("Token validation failed: {:?}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    let (Ok(id), Ok(role)) = (
        claims.sub.parse::<UserId>(),
        claims.role.parse::<Role>(),
    ) else {
        warn!("Token carried an unparseable identity");
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(CurrentUser {
        id,
        role,
        email: claims.email,
    });
    Ok(next.run(request).await)
}
