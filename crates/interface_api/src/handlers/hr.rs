//! HR handlers: account management, approval, reporting and exports

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Role, UserId};
use domain_claims::ReportRow;
use domain_users::UserUpdate;

use crate::dto::users::{
    CreateLecturerRequest, OverviewResponse, UpdateUserRequest, UserResponse,
};
use crate::error::ApiError;
use crate::export;
use crate::middleware::{require_role, CurrentUser};
use crate::AppState;

/// Full user directory listing
pub async fn list_users(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    require_role(&current, Role::Hr)?;
    let users = state.directory.all().await;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Creates a lecturer that can log in immediately
pub async fn create_lecturer(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<CreateLecturerRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    request.validate()?;

    let user = state
        .directory
        .create_lecturer(
            current.role,
            &request.name,
            &request.email,
            &request.password,
            request.hourly_rate,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Opens the login gate for a lecturer account; idempotent
pub async fn approve_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .directory
        .approve(current.role, UserId::from_uuid(id))
        .await?;
    Ok(Json(user.into()))
}

/// Edits account name, email, role or hourly rate
pub async fn update_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let update = UserUpdate {
        name: request.name,
        email: request.email,
        role: request.role,
        hourly_rate: request.hourly_rate,
    };
    let user = state
        .directory
        .update_profile(current.role, UserId::from_uuid(id), update)
        .await?;
    Ok(Json(user.into()))
}

/// Pipeline summary counts
pub async fn overview(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<OverviewResponse>, ApiError> {
    require_role(&current, Role::Hr)?;
    let claims = state.engine.overview().await;
    Ok(Json(OverviewResponse {
        total_users: state.directory.all().await.len(),
        total_claims: claims.total_claims,
        approved_count: claims.approved_count,
        rejected_count: claims.rejected_count,
    }))
}

/// Approved claims grouped per lecturer, descending by amount
pub async fn reports(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<ReportRow>>, ApiError> {
    require_role(&current, Role::Hr)?;
    Ok(Json(state.engine.report_rows().await))
}

/// Approved-claims report as CSV
pub async fn export_reports_csv(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&current, Role::Hr)?;
    let rows = state.engine.report_rows().await;
    let bytes = export::report_rows_csv(&rows)?;
    Ok(csv_download("ApprovedClaimsReport.csv", bytes))
}

/// Lecturer directory as CSV
pub async fn export_lecturers_csv(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&current, Role::Hr)?;
    let users = state.directory.all().await;
    let bytes = export::lecturers_csv(&users)?;
    Ok(csv_download("lecturers.csv", bytes))
}

fn csv_download(file_name: &str, bytes: Vec<u8>) -> impl IntoResponse {
    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];
    (headers, bytes)
}
