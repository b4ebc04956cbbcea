use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::models::application::{
    Applicant, Application, ApplicationStatus, AppliedJob, CandidateResume,
};
use crate::models::user::Role;
use crate::services::storage_service::{ResumeStorage, ResumeUpload};

const APPLICANT_COLUMNS: &str = r#"
    a.id AS application_id,
    a.job_id,
    j.title AS job_title,
    a.candidate_id,
    COALESCE(NULLIF(TRIM(CONCAT(p.first_name, ' ', p.last_name)), ''), u.email) AS candidate_name,
    u.email AS candidate_email,
    a.status,
    a.resume_filename,
    a.applied_at
"#;

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
    storage: ResumeStorage,
}

impl ApplicationService {
    pub fn new(pool: PgPool, storage: ResumeStorage) -> Self {
        Self { pool, storage }
    }

    pub fn storage(&self) -> &ResumeStorage {
        &self.storage
    }

    /// The resume, if any, is written only after every check passes and is
    /// deleted again if no row is inserted. The candidate must be an existing
    /// candidate account.
    pub async fn apply(
        &self,
        job_id: i64,
        candidate_id: i64,
        resume: Option<ResumeUpload>,
    ) -> Result<Application> {
        let job_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1)")
            .bind(job_id)
            .fetch_one(&self.pool)
            .await?;
        if !job_exists {
            return Err(Error::NotFound("Job not found".into()));
        }

        if self.has_applied(job_id, candidate_id).await? {
            tracing::info!(job_id, candidate_id, "Duplicate application rejected");
            return Err(Error::DuplicateApplication);
        }

        let resume_filename = match &resume {
            Some(upload) => Some(self.storage.store(upload).await?),
            None => None,
        };

        let inserted = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (job_id, candidate_id, status, resume_filename, applied_at)
            SELECT $1, u.id, 'pending', $3, NOW()
            FROM users u
            WHERE u.id = $2 AND u.role = $4
            RETURNING id, job_id, candidate_id, status, resume_filename, applied_at
            "#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .bind(&resume_filename)
        .bind(Role::Candidate.as_str())
        .fetch_optional(&self.pool)
        .await;

        let result = match inserted {
            Ok(Some(application)) => Ok(application),
            Ok(None) => Err(Error::NotFound("Candidate not found".into())),
            Err(e) => {
                let err = Error::from(e);
                if err.is_unique_violation() {
                    Err(Error::DuplicateApplication)
                } else if err.is_foreign_key_violation() {
                    Err(Error::NotFound("Job not found".into()))
                } else {
                    Err(err)
                }
            }
        };

        match result {
            Ok(application) => {
                tracing::info!(
                    application_id = application.id,
                    job_id,
                    candidate_id,
                    has_resume = application.resume_filename.is_some(),
                    "Application submitted"
                );
                Ok(application)
            }
            Err(err) => {
                if let Some(filename) = &resume_filename {
                    self.storage.remove(filename).await;
                }
                tracing::warn!(job_id, candidate_id, error = %err, "Application not recorded");
                Err(err)
            }
        }
    }

    pub async fn has_applied(&self, job_id: i64, candidate_id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM applications WHERE job_id = $1 AND candidate_id = $2)",
        )
        .bind(job_id)
        .bind(candidate_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn list_for_recruiter(&self, recruiter_id: i64) -> Result<Vec<Applicant>> {
        let query = format!(
            r#"
            SELECT {APPLICANT_COLUMNS}
            FROM applications a
            JOIN jobs j ON a.job_id = j.id
            JOIN users u ON a.candidate_id = u.id
            LEFT JOIN profiles p ON p.user_id = u.id
            WHERE j.recruiter_id = $1
            ORDER BY a.applied_at DESC, a.id DESC
            "#
        );
        let rows = sqlx::query_as::<_, Applicant>(&query)
            .bind(recruiter_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_for_job(&self, job_id: i64) -> Result<Vec<Applicant>> {
        let query = format!(
            r#"
            SELECT {APPLICANT_COLUMNS}
            FROM applications a
            JOIN jobs j ON a.job_id = j.id
            JOIN users u ON a.candidate_id = u.id
            LEFT JOIN profiles p ON p.user_id = u.id
            WHERE a.job_id = $1
            ORDER BY a.applied_at DESC, a.id DESC
            "#
        );
        let rows = sqlx::query_as::<_, Applicant>(&query)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_for_candidate(&self, candidate_id: i64) -> Result<Vec<AppliedJob>> {
        let rows = sqlx::query_as::<_, AppliedJob>(
            r#"
            SELECT id AS application_id, job_id, status, applied_at
            FROM applications
            WHERE candidate_id = $1
            ORDER BY applied_at DESC, id DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_resumes(&self, candidate_id: i64) -> Result<Vec<CandidateResume>> {
        let rows = sqlx::query_as::<_, CandidateResume>(
            r#"
            SELECT DISTINCT resume_filename, applied_at AS uploaded_at
            FROM applications
            WHERE candidate_id = $1 AND resume_filename IS NOT NULL
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Ownership is part of the UPDATE itself; nothing matched means the
    /// recruiter does not own the application's job.
    pub async fn update_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
        recruiter_id: i64,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE applications a
            SET status = $1
            FROM jobs j
            WHERE a.job_id = j.id AND a.id = $2 AND j.recruiter_id = $3
            "#,
        )
        .bind(status.as_str())
        .bind(application_id)
        .bind(recruiter_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(application_id, recruiter_id, "Status update refused");
            return Err(Error::Forbidden(
                "You don't have permission to update this application".into(),
            ));
        }

        tracing::info!(application_id, recruiter_id, status = %status, "Application status updated");
        Ok(())
    }

    /// Resume of an application on one of the recruiter's jobs.
    pub async fn resume_for_recruiter(
        &self,
        application_id: i64,
        recruiter_id: i64,
    ) -> Result<String> {
        let filename: Option<Option<String>> = sqlx::query_scalar(
            r#"
            SELECT a.resume_filename
            FROM applications a
            JOIN jobs j ON a.job_id = j.id
            WHERE a.id = $1 AND j.recruiter_id = $2
            "#,
        )
        .bind(application_id)
        .bind(recruiter_id)
        .fetch_optional(&self.pool)
        .await?;

        filename
            .flatten()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::NotFound("Resume not found or access denied".into()))
    }

    /// Resume of any application, without an ownership check.
    pub async fn resume_for_application(&self, application_id: i64) -> Result<String> {
        let filename: Option<Option<String>> =
            sqlx::query_scalar("SELECT resume_filename FROM applications WHERE id = $1")
                .bind(application_id)
                .fetch_optional(&self.pool)
                .await?;

        filename
            .flatten()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::NotFound("Resume not found or access denied".into()))
    }

    /// Whether `user_id` submitted the resume or owns the job it was sent to.
    pub async fn can_access_resume(&self, filename: &str, user_id: i64) -> Result<bool> {
        let allowed: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM applications a
                JOIN jobs j ON a.job_id = j.id
                WHERE a.resume_filename = $1 AND (a.candidate_id = $2 OR j.recruiter_id = $2)
            )
            "#,
        )
        .bind(filename)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(allowed)
    }
}
