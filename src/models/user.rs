use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> crate::error::Result<Role> {
        self.role.parse()
    }
}

/// Account role. Each variant owns exactly one role-profile table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Candidate,
    Recruiter,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Candidate, Role::Recruiter, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Recruiter => "recruiter",
            Role::Admin => "admin",
        }
    }

    pub fn profile_table(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate_profiles",
            Role::Recruiter => "recruiter_profiles",
            Role::Admin => "admin_profiles",
        }
    }

    pub(crate) fn insert_profile_sql(&self) -> &'static str {
        match self {
            Role::Candidate => "INSERT INTO candidate_profiles (user_id) VALUES ($1)",
            Role::Recruiter => "INSERT INTO recruiter_profiles (user_id) VALUES ($1)",
            Role::Admin => "INSERT INTO admin_profiles (user_id) VALUES ($1)",
        }
    }

    pub(crate) fn profile_exists_sql(&self) -> &'static str {
        match self {
            Role::Candidate => {
                "SELECT EXISTS(SELECT 1 FROM candidate_profiles WHERE user_id = $1)"
            }
            Role::Recruiter => {
                "SELECT EXISTS(SELECT 1 FROM recruiter_profiles WHERE user_id = $1)"
            }
            Role::Admin => "SELECT EXISTS(SELECT 1 FROM admin_profiles WHERE user_id = $1)",
        }
    }

    pub(crate) fn touch_profile_sql(&self) -> &'static str {
        match self {
            Role::Candidate => {
                "UPDATE candidate_profiles SET updated_at = NOW() WHERE user_id = $1"
            }
            Role::Recruiter => {
                "UPDATE recruiter_profiles SET updated_at = NOW() WHERE user_id = $1"
            }
            Role::Admin => "UPDATE admin_profiles SET updated_at = NOW() WHERE user_id = $1",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "candidate" => Ok(Role::Candidate),
            "recruiter" => Ok(Role::Recruiter),
            "admin" => Ok(Role::Admin),
            other => Err(crate::error::Error::BadRequest(format!(
                "Unknown role: {}",
                other
            ))),
        }
    }
}
