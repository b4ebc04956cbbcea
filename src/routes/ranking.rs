use axum::{extract::State, response::IntoResponse, Extension, Json};

use crate::{
    dto::ranking_dto::{RankRequest, RankResponse},
    error::{Error, Result},
    models::user::Role,
    utils::{extract::AppJson, token::Claims},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/rank-resumes",
    tag = "Ranking",
    request_body = RankRequest,
    responses(
        (status = 200, description = "Applications sorted by score, best first", body = RankResponse),
        (status = 400, description = "Invalid data"),
        (status = 403, description = "Job belongs to another recruiter"),
        (status = 404, description = "Job not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn rank_resumes(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<RankRequest>,
) -> Result<impl IntoResponse> {
    let job_id = match payload.job_id {
        Some(id) if id > 0 && !payload.applications.is_empty() => id,
        _ => return Err(Error::BadRequest("Invalid data".into())),
    };

    let job = state.job_service.get_by_id(job_id).await?;
    claims.ensure_acting_as(Role::Recruiter, job.recruiter_id)?;

    let rankings = state.ranking_service.rank(&job, payload.applications);
    Ok(Json(RankResponse {
        success: true,
        rankings,
    }))
}
