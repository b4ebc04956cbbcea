use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::application::{Applicant, AppliedJob, CandidateResume};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplyResponse {
    pub success: bool,
    pub message: String,
    pub application_id: i64,
    pub status: String,
    pub resume_filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicantListResponse {
    pub success: bool,
    pub applications: Vec<Applicant>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppliedJobListResponse {
    pub success: bool,
    pub applications: Vec<AppliedJob>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResumeListResponse {
    pub success: bool,
    pub resumes: Vec<CandidateResume>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    #[serde(default, deserialize_with = "crate::dto::deserialize_optional_id")]
    pub application_id: Option<i64>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::deserialize_optional_id")]
    pub recruiter_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecruiterQuery {
    #[serde(default, deserialize_with = "crate::dto::deserialize_optional_id")]
    pub recruiter_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobQuery {
    #[serde(default, deserialize_with = "crate::dto::deserialize_optional_id")]
    pub job_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateQuery {
    #[serde(default, deserialize_with = "crate::dto::deserialize_optional_id")]
    pub candidate_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloadResumeQuery {
    #[serde(default, deserialize_with = "crate::dto::deserialize_optional_id")]
    pub application_id: Option<i64>,
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::deserialize_optional_id")]
    pub recruiter_id: Option<i64>,
}
