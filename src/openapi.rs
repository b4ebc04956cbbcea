//! OpenAPI document for the job board API, served as JSON at
//! `/api-docs/openapi.json`.

use axum::Json;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::dto::{
    application_dto::{
        ApplicantListResponse, AppliedJobListResponse, ApplyResponse, ResumeListResponse,
        UpdateStatusPayload,
    },
    auth_dto::{
        LoginPayload, LoginResponse, LoginUser, MessageResponse, ProfileResponse,
        RegisterPayload, RegisterResponse, RegisteredUser, RoleProfileFields,
        UpdateProfilePayload,
    },
    job_dto::{CreateJobPayload, CreateJobResponse, JobListResponse, RecruiterJobListResponse},
    ranking_dto::{RankApplication, RankRequest, RankResponse, RankedApplication},
};
use crate::models::{
    application::{Applicant, Application, ApplicationStatus, AppliedJob, CandidateResume},
    job::{Job, JobListing},
    user::Role,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "JobNexus API",
        version = "1.0.0",
        description = "Job board backend: accounts with role profiles, job postings, \
        applications with resume upload, and applicant ranking.\n\n\
        Protected endpoints take `Authorization: Bearer <token>` with the token returned by `/api/login`."
    ),
    tags(
        (name = "Identity", description = "Registration, login and profiles"),
        (name = "Jobs", description = "Job postings"),
        (name = "Applications", description = "Applications, status changes and resumes"),
        (name = "Ranking", description = "Heuristic applicant ranking")
    ),
    paths(
        crate::routes::health::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::get_profile,
        crate::routes::auth::update_profile,
        crate::routes::jobs::post_job,
        crate::routes::jobs::list_jobs,
        crate::routes::jobs::recruiter_jobs,
        crate::routes::applications::apply_job,
        crate::routes::applications::get_applicants,
        crate::routes::applications::job_applications,
        crate::routes::applications::applied_jobs,
        crate::routes::applications::candidate_resumes,
        crate::routes::applications::update_application_status,
        crate::routes::applications::download_resume,
        crate::routes::ranking::rank_resumes,
    ),
    components(
        schemas(
            Role,
            RegisterPayload,
            RegisterResponse,
            RegisteredUser,
            LoginPayload,
            LoginResponse,
            LoginUser,
            RoleProfileFields,
            UpdateProfilePayload,
            ProfileResponse,
            MessageResponse,
            Job,
            JobListing,
            CreateJobPayload,
            CreateJobResponse,
            JobListResponse,
            RecruiterJobListResponse,
            Application,
            ApplicationStatus,
            Applicant,
            AppliedJob,
            CandidateResume,
            ApplyResponse,
            ApplicantListResponse,
            AppliedJobListResponse,
            ResumeListResponse,
            UpdateStatusPayload,
            RankApplication,
            RankRequest,
            RankedApplication,
            RankResponse,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token returned by /api/login"))
                        .build(),
                ),
            );
        }
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
