//! Lecturer claim handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{ClaimId, Role};
use domain_claims::{Claim, ClaimDraft, LecturerProfile, ProposedFile};

use crate::dto::claims::{ClaimResponse, CreateClaimRequest, LecturerDashboardResponse};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::AppState;

/// Lecturer submits a claim with optional attachments
///
/// Attachment content travels base64-encoded; the engine validates the
/// metadata against the upload guard and assigns storage names, then the
/// accepted bytes are handed to the file storage collaborator.
pub async fn create_claim(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<CreateClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    request.validate()?;

    let mut decoded: Vec<(String, Vec<u8>)> = Vec::with_capacity(request.attachments.len());
    for upload in &request.attachments {
        let bytes = STANDARD.decode(&upload.content_base64).map_err(|_| {
            ApiError::BadRequest(format!(
                "{}: attachment content is not valid base64",
                upload.file_name
            ))
        })?;
        decoded.push((upload.file_name.clone(), bytes));
    }

    // Rate and identity come from the directory, never from the client
    let user = state.directory.get(current.id).await?;
    let profile = LecturerProfile {
        name: user.name,
        email: user.email,
        hourly_rate: user.hourly_rate,
    };

    let draft = ClaimDraft {
        hours_worked: request.hours_worked,
        notes: request.notes,
        files: decoded
            .iter()
            .map(|(file_name, bytes)| ProposedFile {
                file_name: file_name.clone(),
                size: bytes.len() as u64,
            })
            .collect(),
    };

    let claim = state.engine.submit(&current.actor(), &profile, draft).await?;

    // The engine drops zero-byte files; accepted attachments align with the
    // remaining uploads in order
    let accepted = decoded.iter().filter(|(_, bytes)| !bytes.is_empty());
    for (attachment, (_, bytes)) in claim.attachments.iter().zip(accepted) {
        state.files.save(&attachment.stored_as, bytes).await?;
    }

    Ok((StatusCode::CREATED, Json(claim.into())))
}

/// Lecturer's own claims with summary counts
pub async fn my_claims(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<LecturerDashboardResponse>, ApiError> {
    let dashboard = state.engine.lecturer_dashboard(&current.email).await;
    Ok(Json(dashboard.into()))
}

/// Fetches one claim
pub async fn get_claim(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.engine.claim(ClaimId::from_uuid(id)).await?;
    ensure_claim_visible(&current, &claim)?;
    Ok(Json(claim.into()))
}

/// Downloads an attachment by its storage-assigned name
pub async fn download_attachment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path((id, stored_as)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.engine.claim(ClaimId::from_uuid(id)).await?;
    ensure_claim_visible(&current, &claim)?;

    let attachment = claim
        .attachments
        .iter()
        .find(|a| a.stored_as == stored_as)
        .ok_or_else(|| ApiError::NotFound(format!("attachment not found: {stored_as}")))?;

    let bytes = state.files.load(&attachment.stored_as).await?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", attachment.file_name),
        ),
    ];
    Ok((headers, bytes))
}

/// Lecturers see their own claims; the review and HR roles see all of them
fn ensure_claim_visible(current: &CurrentUser, claim: &Claim) -> Result<(), ApiError> {
    if current.role == Role::Lecturer
        && !claim.lecturer.email.eq_ignore_ascii_case(&current.email)
    {
        return Err(ApiError::Forbidden(
            "this claim belongs to another lecturer".to_string(),
        ));
    }
    Ok(())
}
