use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::job_dto::{
        CreateJobPayload, CreateJobResponse, JobListResponse, RecruiterJobListResponse,
        RecruiterJobsQuery,
    },
    error::{Error, Result},
    models::user::Role,
    utils::{
        extract::{AppJson, AppQuery},
        token::Claims,
    },
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/post-job",
    tag = "Jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job posted", body = CreateJobResponse),
        (status = 400, description = "Missing required fields"),
        (status = 403, description = "Caller is not this recruiter"),
        (status = 404, description = "Recruiter not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn post_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    let job = payload.into_new_job()?;
    claims.ensure_acting_as(Role::Recruiter, job.recruiter_id)?;
    let job_id = state.job_service.create(&job).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateJobResponse {
            success: true,
            message: "Job posted successfully".into(),
            job_id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/get-jobs",
    tag = "Jobs",
    responses(
        (status = 200, description = "All jobs, newest first", body = JobListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list().await?;
    Ok(Json(JobListResponse {
        success: true,
        jobs,
    }))
}

#[utoipa::path(
    get,
    path = "/api/recruiter-jobs",
    tag = "Jobs",
    params(("recruiter_id" = i64, Query, description = "Recruiter user ID")),
    responses(
        (status = 200, description = "Jobs owned by the recruiter", body = RecruiterJobListResponse),
        (status = 400, description = "Recruiter ID required")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn recruiter_jobs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppQuery(query): AppQuery<RecruiterJobsQuery>,
) -> Result<impl IntoResponse> {
    let recruiter_id = query
        .recruiter_id
        .filter(|id| *id > 0)
        .ok_or_else(|| Error::BadRequest("Recruiter ID required".into()))?;
    claims.ensure_acting_as(Role::Recruiter, recruiter_id)?;

    let jobs = state.job_service.list_by_recruiter(recruiter_id).await?;
    Ok(Json(RecruiterJobListResponse {
        success: true,
        jobs,
    }))
}
