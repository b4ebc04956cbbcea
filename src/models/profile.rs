use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use sqlx::FromRow;

use super::user::Role;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateProfile {
    pub user_id: i64,
    pub headline: Option<String>,
    pub skills: Option<String>,
    pub experience_years: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecruiterProfile {
    pub user_id: i64,
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminProfile {
    pub user_id: i64,
    pub campus: Option<String>,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum RoleProfile {
    Candidate(CandidateProfile),
    Recruiter(RecruiterProfile),
    Admin(AdminProfile),
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Candidate(_) => Role::Candidate,
            RoleProfile::Recruiter(_) => Role::Recruiter,
            RoleProfile::Admin(_) => Role::Admin,
        }
    }

    fn to_json(&self) -> serde_json::Result<JsonValue> {
        match self {
            RoleProfile::Candidate(p) => serde_json::to_value(p),
            RoleProfile::Recruiter(p) => serde_json::to_value(p),
            RoleProfile::Admin(p) => serde_json::to_value(p),
        }
    }
}

/// Flattens the common profile and the role profile into one object.
/// Role-specific keys win on collision.
pub fn merge_profiles(
    common: Option<&Profile>,
    role_profile: Option<&RoleProfile>,
) -> serde_json::Result<Map<String, JsonValue>> {
    let mut merged = Map::new();
    if let Some(common) = common {
        if let JsonValue::Object(fields) = serde_json::to_value(common)? {
            merged.extend(fields);
        }
    }
    if let Some(role_profile) = role_profile {
        if let JsonValue::Object(fields) = role_profile.to_json()? {
            merged.extend(fields);
        }
    }
    Ok(merged)
}
