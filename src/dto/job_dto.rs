use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Result;
use crate::models::job::{Job, JobListing};
use crate::utils::validation::{required_id, required_text};

const MISSING_FIELDS: &str = "Missing required fields";

/// Fields are optional so that blanks and omissions share one error message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateJobPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::dto::deserialize_optional_id")]
    pub recruiter_id: Option<i64>,
}

impl CreateJobPayload {
    /// Trims title and description; any blank or missing field is one error.
    pub fn into_new_job(self) -> Result<NewJob> {
        Ok(NewJob {
            title: required_text(self.title.as_deref(), MISSING_FIELDS)?,
            description: required_text(self.description.as_deref(), MISSING_FIELDS)?,
            recruiter_id: required_id(self.recruiter_id, MISSING_FIELDS)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub recruiter_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateJobResponse {
    pub success: bool,
    pub message: String,
    pub job_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobListResponse {
    pub success: bool,
    pub jobs: Vec<JobListing>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecruiterJobListResponse {
    pub success: bool,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecruiterJobsQuery {
    #[serde(default, deserialize_with = "crate::dto::deserialize_optional_id")]
    pub recruiter_id: Option<i64>,
}
