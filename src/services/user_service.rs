use serde_json::{Map, Value as JsonValue};
use sqlx::{PgPool, Postgres, Transaction};

use crate::dto::auth_dto::{RegisterPayload, RegisteredUser, RoleProfileFields, UpdateProfilePayload};
use crate::error::{Error, Result};
use crate::models::profile::{
    merge_profiles, AdminProfile, CandidateProfile, Profile, RecruiterProfile, RoleProfile,
};
use crate::models::user::{Role, User};
use crate::utils::crypto::{hash_password_blocking, verify_password_blocking};
use crate::utils::token::SessionTokens;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
    tokens: SessionTokens,
}

pub struct LoginOutcome {
    pub user: User,
    pub profile: Map<String, JsonValue>,
    pub token: String,
}

impl UserService {
    pub fn new(pool: PgPool, tokens: SessionTokens) -> Self {
        Self { pool, tokens }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<RegisteredUser> {
        let role = payload.role()?;
        let email = payload.email.trim().to_string();

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(&email)
                .fetch_one(&self.pool)
                .await?;
        if exists {
            return Err(Error::DuplicateEmail);
        }

        let password_hash = hash_password_blocking(payload.password.clone()).await?;

        let mut tx = self.pool.begin().await?;
        let user_id = insert_account(
            &mut tx,
            &email,
            &password_hash,
            role,
            &payload.first_name,
            &payload.last_name,
        )
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                Error::DuplicateEmail
            } else {
                e
            }
        })?;
        tx.commit().await?;

        tracing::info!(user_id, role = %role, "Registered user");

        Ok(RegisteredUser {
            id: user_id,
            email,
            role,
            first_name: payload.first_name,
            last_name: payload.last_name,
        })
    }

    pub async fn login(&self, email: &str, password: &str, role: Role) -> Result<LoginOutcome> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, created_at, updated_at
             FROM users WHERE email = $1 AND role = $2",
        )
        .bind(email.trim())
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;

        if !verify_password_blocking(password.to_owned(), user.password_hash.clone()).await? {
            tracing::warn!(user_id = user.id, "Login rejected: bad password");
            return Err(Error::InvalidCredential);
        }

        let profile = self.merged_profile(user.id, role).await?;
        let token = self.tokens.issue(user.id, &user.email, role)?;

        tracing::info!(user_id = user.id, role = %role, "User logged in");
        Ok(LoginOutcome {
            user,
            profile,
            token,
        })
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))
    }

    /// Common profile merged with the role profile, tagged with `role`.
    pub async fn get_profile(&self, user_id: i64) -> Result<Map<String, JsonValue>> {
        let user = self.get_user(user_id).await?;
        let role = user.role()?;
        let mut profile = self.merged_profile(user_id, role).await?;
        profile.insert("role".into(), JsonValue::String(role.to_string()));
        Ok(profile)
    }

    pub async fn update_profile(&self, user_id: i64, payload: UpdateProfilePayload) -> Result<()> {
        let user = self.get_user(user_id).await?;
        let role = match payload.role.as_deref() {
            Some(raw) => raw.parse()?,
            None => user.role()?,
        };
        if role != user.role()? {
            return Err(Error::BadRequest(format!(
                "User {} is not a {}",
                user.id, role
            )));
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, first_name, last_name, phone)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                phone = EXCLUDED.phone,
                updated_at = NOW()
            "#,
        )
        .bind(user.id)
        .bind(payload.first_name.as_deref().unwrap_or_default())
        .bind(payload.last_name.as_deref().unwrap_or_default())
        .bind(payload.phone.as_deref().unwrap_or_default())
        .execute(&mut *tx)
        .await?;

        let exists: bool = sqlx::query_scalar(role.profile_exists_sql())
            .bind(user.id)
            .fetch_one(&mut *tx)
            .await?;
        if exists {
            sqlx::query(role.touch_profile_sql())
                .bind(user.id)
                .execute(&mut *tx)
                .await?;
        } else {
            sqlx::query(role.insert_profile_sql())
                .bind(user.id)
                .execute(&mut *tx)
                .await?;
        }

        write_role_fields(&mut tx, user.id, role, &payload.role_fields).await?;

        tx.commit().await?;
        tracing::info!(user_id = user.id, role = %role, "Profile updated");
        Ok(())
    }

    async fn merged_profile(&self, user_id: i64, role: Role) -> Result<Map<String, JsonValue>> {
        let common = sqlx::query_as::<_, Profile>(
            "SELECT user_id, first_name, last_name, phone, created_at, updated_at
             FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let role_profile = self.fetch_role_profile(user_id, role).await?;

        merge_profiles(common.as_ref(), role_profile.as_ref())
            .map_err(|e| Error::Internal(format!("Failed to assemble profile: {}", e)))
    }

    async fn fetch_role_profile(&self, user_id: i64, role: Role) -> Result<Option<RoleProfile>> {
        let profile = match role {
            Role::Candidate => sqlx::query_as::<_, CandidateProfile>(
                "SELECT user_id, headline, skills, experience_years, created_at, updated_at
                 FROM candidate_profiles WHERE user_id = $1",
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .map(RoleProfile::Candidate),
            Role::Recruiter => sqlx::query_as::<_, RecruiterProfile>(
                "SELECT user_id, company_name, position, created_at, updated_at
                 FROM recruiter_profiles WHERE user_id = $1",
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .map(RoleProfile::Recruiter),
            Role::Admin => sqlx::query_as::<_, AdminProfile>(
                "SELECT user_id, campus, department, created_at, updated_at
                 FROM admin_profiles WHERE user_id = $1",
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .map(RoleProfile::Admin),
        };
        Ok(profile)
    }
}

/// User, profile and empty role profile. Runs inside the caller's transaction.
async fn insert_account(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password_hash: &str,
    role: Role,
    first_name: &str,
    last_name: &str,
) -> Result<i64> {
    let user_id: i64 = sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(&mut **tx)
    .await?;

    sqlx::query("INSERT INTO profiles (user_id, first_name, last_name) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(first_name)
        .bind(last_name)
        .execute(&mut **tx)
        .await?;

    sqlx::query(role.insert_profile_sql())
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

    Ok(user_id)
}

/// Only the fields that belong to `role` are written; absent fields keep their value.
async fn write_role_fields(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    role: Role,
    fields: &RoleProfileFields,
) -> Result<()> {
    match role {
        Role::Candidate => {
            if fields.headline.is_none() && fields.skills.is_none() && fields.experience_years.is_none() {
                return Ok(());
            }
            sqlx::query(
                "UPDATE candidate_profiles SET
                    headline = COALESCE($2, headline),
                    skills = COALESCE($3, skills),
                    experience_years = COALESCE($4, experience_years),
                    updated_at = NOW()
                 WHERE user_id = $1",
            )
            .bind(user_id)
            .bind(&fields.headline)
            .bind(&fields.skills)
            .bind(fields.experience_years)
            .execute(&mut **tx)
            .await?;
        }
        Role::Recruiter => {
            if fields.company_name.is_none() && fields.position.is_none() {
                return Ok(());
            }
            sqlx::query(
                "UPDATE recruiter_profiles SET
                    company_name = COALESCE($2, company_name),
                    position = COALESCE($3, position),
                    updated_at = NOW()
                 WHERE user_id = $1",
            )
            .bind(user_id)
            .bind(&fields.company_name)
            .bind(&fields.position)
            .execute(&mut **tx)
            .await?;
        }
        Role::Admin => {
            if fields.campus.is_none() && fields.department.is_none() {
                return Ok(());
            }
            sqlx::query(
                "UPDATE admin_profiles SET
                    campus = COALESCE($2, campus),
                    department = COALESCE($3, department),
                    updated_at = NOW()
                 WHERE user_id = $1",
            )
            .bind(user_id)
            .bind(&fields.campus)
            .bind(&fields.department)
            .execute(&mut **tx)
            .await?;
        }
    }
    Ok(())
}
