use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub recruiter_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JobListing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub recruiter_id: i64,
    pub recruiter_email: String,
    pub created_at: DateTime<Utc>,
}
