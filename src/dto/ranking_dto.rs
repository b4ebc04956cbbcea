use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RankApplication {
    pub application_id: Option<i64>,
    pub candidate_id: Option<i64>,
    pub candidate_name: Option<String>,
    pub resume_filename: Option<String>,
    pub applied_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankRequest {
    #[serde(default, deserialize_with = "crate::dto::deserialize_optional_id")]
    pub job_id: Option<i64>,
    #[serde(default)]
    pub applications: Vec<RankApplication>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankedApplication {
    #[serde(flatten)]
    pub application: RankApplication,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankResponse {
    pub success: bool,
    pub rankings: Vec<RankedApplication>,
}
