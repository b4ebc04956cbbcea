use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};
use tokio_util::io::ReaderStream;

use crate::{
    dto::{
        application_dto::{
            ApplicantListResponse, AppliedJobListResponse, ApplyResponse, CandidateQuery,
            DownloadResumeQuery, JobQuery, RecruiterQuery, ResumeListResponse,
            UpdateStatusPayload,
        },
        auth_dto::MessageResponse,
    },
    error::{Error, Result},
    models::{application::ApplicationStatus, user::Role},
    services::storage_service::content_type_for,
    utils::{
        extract::{AppJson, AppQuery},
        token::Claims,
        validation::is_resume_filename,
    },
    AppState,
};

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

#[utoipa::path(
    post,
    path = "/api/apply-job",
    tag = "Applications",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "Fields `job_id`, `candidate_id` and an optional `resume` file (pdf, doc, docx, txt; 10 MiB max)"
    ),
    responses(
        (status = 201, description = "Application submitted", body = ApplyResponse),
        (status = 400, description = "Missing ids, unsupported or empty file"),
        (status = 404, description = "Job or candidate not found"),
        (status = 409, description = "Already applied to this job"),
        (status = 413, description = "Resume too large")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn apply_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse> {
    let mut multipart = multipart?;
    let mut job_id = None;
    let mut candidate_id = None;
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_id" => job_id = parse_id(&field.text().await?),
            "candidate_id" => candidate_id = parse_id(&field.text().await?),
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                if !filename.is_empty() {
                    upload = Some((filename, data));
                }
            }
            _ => {}
        }
    }

    let (Some(job_id), Some(candidate_id)) = (job_id, candidate_id) else {
        return Err(Error::BadRequest("Missing job_id or candidate_id".into()));
    };
    claims.ensure_acting_as(Role::Candidate, candidate_id)?;

    let resume = match upload {
        Some((filename, data)) => Some(
            state
                .application_service
                .storage()
                .check(&filename, data)?,
        ),
        None => None,
    };

    let application = state
        .application_service
        .apply(job_id, candidate_id, resume)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplyResponse {
            success: true,
            message: "Application submitted successfully".into(),
            application_id: application.id,
            status: application.status,
            resume_filename: application.resume_filename,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/get-applicants",
    tag = "Applications",
    params(("recruiter_id" = i64, Query, description = "Recruiter user ID")),
    responses(
        (status = 200, description = "Applications to the recruiter's jobs", body = ApplicantListResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn get_applicants(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppQuery(query): AppQuery<RecruiterQuery>,
) -> Result<impl IntoResponse> {
    let recruiter_id = query
        .recruiter_id
        .filter(|id| *id > 0)
        .ok_or_else(|| Error::BadRequest("Recruiter ID required".into()))?;
    claims.ensure_acting_as(Role::Recruiter, recruiter_id)?;

    let applications = state
        .application_service
        .list_for_recruiter(recruiter_id)
        .await?;
    Ok(Json(ApplicantListResponse {
        success: true,
        applications,
    }))
}

#[utoipa::path(
    get,
    path = "/api/job-applications",
    tag = "Applications",
    params(("job_id" = i64, Query, description = "Job ID")),
    responses(
        (status = 200, description = "Applications for the job", body = ApplicantListResponse),
        (status = 403, description = "Job belongs to another recruiter"),
        (status = 404, description = "Job not found")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn job_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppQuery(query): AppQuery<JobQuery>,
) -> Result<impl IntoResponse> {
    let job_id = query
        .job_id
        .filter(|id| *id > 0)
        .ok_or_else(|| Error::BadRequest("Job ID required".into()))?;
    let job = state.job_service.get_by_id(job_id).await?;
    claims.ensure_acting_as(Role::Recruiter, job.recruiter_id)?;

    let applications = state.application_service.list_for_job(job_id).await?;
    Ok(Json(ApplicantListResponse {
        success: true,
        applications,
    }))
}

#[utoipa::path(
    get,
    path = "/api/get-applied-jobs",
    tag = "Applications",
    params(("candidate_id" = i64, Query, description = "Candidate user ID")),
    responses(
        (status = 200, description = "Jobs the candidate applied to", body = AppliedJobListResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn applied_jobs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppQuery(query): AppQuery<CandidateQuery>,
) -> Result<impl IntoResponse> {
    let candidate_id = query
        .candidate_id
        .filter(|id| *id > 0)
        .ok_or_else(|| Error::BadRequest("Candidate ID required".into()))?;
    claims.ensure_acting_as(Role::Candidate, candidate_id)?;

    let applications = state
        .application_service
        .list_for_candidate(candidate_id)
        .await?;
    Ok(Json(AppliedJobListResponse {
        success: true,
        applications,
    }))
}

#[utoipa::path(
    get,
    path = "/api/get-candidate-resumes",
    tag = "Applications",
    params(("candidate_id" = i64, Query, description = "Candidate user ID")),
    responses(
        (status = 200, description = "Distinct resumes the candidate uploaded", body = ResumeListResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn candidate_resumes(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppQuery(query): AppQuery<CandidateQuery>,
) -> Result<impl IntoResponse> {
    let candidate_id = query
        .candidate_id
        .filter(|id| *id > 0)
        .ok_or_else(|| Error::BadRequest("Candidate ID required".into()))?;
    claims.ensure_acting_as(Role::Candidate, candidate_id)?;

    let resumes = state.application_service.list_resumes(candidate_id).await?;
    Ok(Json(ResumeListResponse {
        success: true,
        resumes,
    }))
}

#[utoipa::path(
    post,
    path = "/api/update-application-status",
    tag = "Applications",
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Missing fields or invalid status"),
        (status = 403, description = "Application is not on one of the recruiter's jobs")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    let (Some(application_id), Some(status), Some(recruiter_id)) =
        (payload.application_id, payload.status, payload.recruiter_id)
    else {
        return Err(Error::BadRequest("Missing required fields".into()));
    };
    let status: ApplicationStatus = status.parse()?;
    claims.ensure_acting_as(Role::Recruiter, recruiter_id)?;

    state
        .application_service
        .update_status(application_id, status, recruiter_id)
        .await?;
    Ok(Json(MessageResponse::ok(
        "Application status updated successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/download-resume",
    tag = "Applications",
    params(
        ("application_id" = Option<i64>, Query, description = "Application whose resume to fetch"),
        ("filename" = Option<String>, Query, description = "Stored resume filename"),
        ("recruiter_id" = Option<i64>, Query, description = "Recruiter owning the application's job")
    ),
    responses(
        (status = 200, description = "Resume bytes with a Content-Type matching the file extension"),
        (status = 400, description = "Missing parameters or invalid filename"),
        (status = 404, description = "Resume not found or access denied")
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn download_resume(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppQuery(query): AppQuery<DownloadResumeQuery>,
) -> Result<impl IntoResponse> {
    let service = &state.application_service;
    let filename = match (query.application_id, query.filename) {
        (Some(application_id), _) => match query.recruiter_id {
            None if claims.is_admin() => service.resume_for_application(application_id).await?,
            recruiter_id => {
                let recruiter_id = match recruiter_id {
                    Some(id) => id,
                    None => claims.user_id()?,
                };
                claims.ensure_acting_as(Role::Recruiter, recruiter_id)?;
                service
                    .resume_for_recruiter(application_id, recruiter_id)
                    .await?
            }
        },
        (None, Some(filename)) => {
            if !is_resume_filename(&filename) {
                return Err(Error::InvalidFilename);
            }
            let allowed = claims.is_admin()
                || service
                    .can_access_resume(&filename, claims.user_id()?)
                    .await?;
            if !allowed {
                tracing::warn!(filename = %filename, user = %claims.sub, "Resume download refused");
                return Err(Error::NotFound("Resume not found or access denied".into()));
            }
            filename
        }
        (None, None) => {
            return Err(Error::BadRequest(
                "Either application_id or filename is required".into(),
            ))
        }
    };

    let stored = service.storage().open(&filename).await?;
    let headers = [
        (header::CONTENT_TYPE, content_type_for(&stored.filename).to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", stored.filename),
        ),
        (header::CONTENT_LENGTH, stored.len.to_string()),
        (
            header::CACHE_CONTROL,
            "private, max-age=0, must-revalidate".to_string(),
        ),
    ];
    let body = Body::from_stream(ReaderStream::new(stored.file));

    Ok((StatusCode::OK, headers, body))
}
