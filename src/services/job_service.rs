use crate::dto::job_dto::NewJob;
use crate::error::{Error, Result};
use crate::models::job::{Job, JobListing};
use crate::models::user::Role;
use sqlx::PgPool;

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The owner must be an existing recruiter account; anything else is
    /// reported as a missing recruiter and nothing is written.
    pub async fn create(&self, job: &NewJob) -> Result<i64> {
        let recruiter_id = job.recruiter_id;
        let job_id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO jobs (title, description, recruiter_id, created_at)
            SELECT $1, $2, u.id, NOW()
            FROM users u
            WHERE u.id = $3 AND u.role = $4
            RETURNING id
            "#,
        )
        .bind(&job.title)
        .bind(&job.description)
        .bind(recruiter_id)
        .bind(Role::Recruiter.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            let err = Error::from(e);
            if err.is_foreign_key_violation() {
                Error::NotFound("Recruiter not found".into())
            } else {
                err
            }
        })?;

        let Some(job_id) = job_id else {
            tracing::warn!(recruiter_id, "Job rejected: owner is not a recruiter");
            return Err(Error::NotFound("Recruiter not found".into()));
        };

        tracing::info!(job_id, recruiter_id, "Job posted");
        Ok(job_id)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Job> {
        sqlx::query_as::<_, Job>(
            "SELECT id, title, description, recruiter_id, created_at FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".into()))
    }

    pub async fn list(&self) -> Result<Vec<JobListing>> {
        let jobs = sqlx::query_as::<_, JobListing>(
            r#"
            SELECT j.id, j.title, j.description, j.recruiter_id, u.email AS recruiter_email, j.created_at
            FROM jobs j
            JOIN users u ON j.recruiter_id = u.id
            ORDER BY j.created_at DESC, j.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn list_by_recruiter(&self, recruiter_id: i64) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, title, description, recruiter_id, created_at
            FROM jobs
            WHERE recruiter_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(recruiter_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }
}
