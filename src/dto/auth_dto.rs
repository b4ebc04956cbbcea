use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::Result;
use crate::models::user::Role;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl RegisterPayload {
    pub fn role(&self) -> Result<Role> {
        parse_role(self.role.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
    pub role: Option<String>,
}

impl LoginPayload {
    pub fn role(&self) -> Result<Role> {
        parse_role(self.role.as_deref())
    }
}

fn parse_role(raw: Option<&str>) -> Result<Role> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Role::default()),
        Some(value) => value.parse(),
    }
}

/// Optional role-specific columns; only those matching the user's role are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleProfileFields {
    pub headline: Option<String>,
    pub skills: Option<String>,
    pub experience_years: Option<i32>,
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub campus: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    #[serde(default, deserialize_with = "crate::dto::deserialize_optional_id")]
    pub user_id: Option<i64>,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    #[serde(flatten)]
    pub role_fields: RoleProfileFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: RegisteredUser,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
    #[schema(value_type = Object)]
    pub profile: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: LoginUser,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub profile: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileQuery {
    #[serde(
        rename = "userId",
        default,
        deserialize_with = "crate::dto::deserialize_optional_id"
    )]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
