pub mod applications;
pub mod auth;
pub mod health;
pub mod jobs;
pub mod ranking;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{middleware::auth::require_bearer_auth, middleware::cors::cors_layer, openapi, AppState};

/// Headroom for the multipart envelope and the id fields around the resume.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn router(state: AppState, cors_origin: Option<&str>) -> Router {
    let body_limit = state.application_service.storage().max_bytes() + MULTIPART_OVERHEAD;

    let public_api = Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/get-jobs", get(jobs::list_jobs));

    let protected_api = Router::new()
        .route("/api/profile", get(auth::get_profile))
        .route("/api/update-profile", post(auth::update_profile))
        .route("/api/post-job", post(jobs::post_job))
        .route("/api/recruiter-jobs", get(jobs::recruiter_jobs))
        .route("/api/apply-job", post(applications::apply_job))
        .route("/api/get-applicants", get(applications::get_applicants))
        .route("/api/job-applications", get(applications::job_applications))
        .route("/api/get-applied-jobs", get(applications::applied_jobs))
        .route(
            "/api/get-candidate-resumes",
            get(applications::candidate_resumes),
        )
        .route(
            "/api/update-application-status",
            post(applications::update_application_status),
        )
        .route("/api/download-resume", get(applications::download_resume))
        .route("/api/rank-resumes", post(ranking::rank_resumes))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_bearer_auth,
        ));

    public_api
        .merge(protected_api)
        .with_state(state)
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit))
}
