//! Verification and approval handlers
//!
//! The transition endpoints are open to any authenticated actor; the
//! lifecycle engine decides whether the (status, action, role) triple is
//! permitted, so authorization lives in exactly one place.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;

use core_kernel::{ClaimId, Role};
use domain_claims::{ClaimAction, HistoryFilter};

use crate::dto::claims::{
    ClaimResponse, CoordinatorDashboardResponse, HistoryQuery, ManagerDashboardResponse,
};
use crate::dto::users::ActivityResponse;
use crate::error::ApiError;
use crate::middleware::{require_role, CurrentUser};
use crate::AppState;

/// Coordinator verifies a pending claim
pub async fn verify(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    transition(&state, &current, id, ClaimAction::Verify).await
}

/// Manager approves a verified claim
pub async fn approve(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    transition(&state, &current, id, ClaimAction::Approve).await
}

/// Coordinator or manager rejects a claim
pub async fn reject(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    transition(&state, &current, id, ClaimAction::Reject).await
}

async fn transition(
    state: &AppState,
    current: &CurrentUser,
    id: Uuid,
    action: ClaimAction,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state
        .engine
        .transition(&current.actor(), ClaimId::from_uuid(id), action)
        .await?;
    Ok(Json(claim.into()))
}

/// Pending claims awaiting verification, with coordinator summary counts
pub async fn coordinator_queue(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<CoordinatorDashboardResponse>, ApiError> {
    require_role(&current, Role::Coordinator)?;
    let dashboard = state.engine.coordinator_dashboard().await;
    Ok(Json(dashboard.into()))
}

/// Verified claims awaiting approval, with manager summary totals
pub async fn manager_queue(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<ManagerDashboardResponse>, ApiError> {
    require_role(&current, Role::Manager)?;
    let dashboard = state.engine.manager_dashboard().await;
    Ok(Json(dashboard.into()))
}

/// Full claim history with optional status and date filters
pub async fn history(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    if current.role == Role::Lecturer {
        return Err(ApiError::Forbidden(
            "claim history is a staff view".to_string(),
        ));
    }

    let filter = HistoryFilter {
        status: query.status,
        from: query.from,
        to: query.to,
    };
    let claims = state.engine.history(&filter).await;
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

/// The acting user's most recent recorded actions, newest first
pub async fn recent_activity(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<ActivityResponse>>, ApiError> {
    let entries = state.engine.activity().recent_for(current.id, 20).await;
    Ok(Json(
        entries
            .into_iter()
            .map(|entry| ActivityResponse {
                message: entry.message,
                role: entry.role,
                at: entry.at,
            })
            .collect(),
    ))
}
