#![allow(dead_code)]

use std::{env, path::Path, str::FromStr, sync::Arc};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use jobnexus_backend::{
    config::Config,
    database::pool::run_migrations,
    routes,
    services::ranking_service::{KeywordScorer, ScoringStrategy},
    AppState,
};
use serde_json::{json, Value as JsonValue};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

pub const BOUNDARY: &str = "----jobnexus-test-boundary";
pub const PASSWORD: &str = "correct-horse-battery";

/// Router backed by a private Postgres schema and a private uploads directory.
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    pub uploads: TempDir,
    schema: String,
    admin_pool: PgPool,
}

impl TestApp {
    /// `None` when `DATABASE_URL` is not set, so the calling test can bail out.
    pub async fn spawn() -> Option<Self> {
        Self::spawn_with_scorer(Arc::new(KeywordScorer::default())).await
    }

    pub async fn spawn_with_scorer(scorer: Arc<dyn ScoringStrategy>) -> Option<Self> {
        dotenvy::dotenv().ok();
        let Ok(database_url) = env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping database test");
            return None;
        };

        let schema = format!("test_{}", Uuid::new_v4().simple());
        let admin_pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await
            .expect("connect");
        sqlx::query(&format!("CREATE SCHEMA {schema}"))
            .execute(&admin_pool)
            .await
            .expect("create schema");

        let options = PgConnectOptions::from_str(&database_url)
            .expect("database url")
            .options([("search_path", schema.as_str())]);
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("schema pool");
        run_migrations(&pool).await.expect("migrations");

        let uploads = tempfile::tempdir().expect("uploads dir");
        let config = Config {
            server_address: "127.0.0.1:0".into(),
            database_url,
            database_max_connections: 5,
            jwt_secret: "test_secret_key".into(),
            token_ttl_hours: 1,
            uploads_dir: uploads.path().to_path_buf(),
            max_resume_bytes: 64 * 1024,
            cors_allowed_origin: None,
        };

        let state = AppState::with_scorer(pool.clone(), &config, scorer);
        let router = routes::router(state, None);

        Some(Self {
            router,
            pool,
            uploads,
            schema,
            admin_pool,
        })
    }

    pub async fn cleanup(self) {
        self.pool.close().await;
        let _ = sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.admin_pool)
            .await;
    }

    pub fn uploads_dir(&self) -> &Path {
        self.uploads.path()
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        std::fs::read_dir(self.uploads.path())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, JsonValue) {
        let resp = self.router.clone().oneshot(req).await.expect("response");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
        let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
        (status, body)
    }

    pub async fn post_json(
        &self,
        uri: &str,
        token: Option<&str>,
        body: JsonValue,
    ) -> (StatusCode, JsonValue) {
        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(req.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, JsonValue) {
        let mut req = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(req.body(Body::empty()).unwrap()).await
    }

    /// Registers and logs in; returns `(user_id, token)`.
    pub async fn sign_up(&self, role: &str) -> (i64, String) {
        let email = format!("{}_{}@example.com", role, Uuid::new_v4().simple());
        let (status, body) = self
            .post_json(
                "/api/register",
                None,
                json!({
                    "email": email,
                    "password": PASSWORD,
                    "role": role,
                    "firstName": "Test",
                    "lastName": role,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register: {body}");

        let (status, body) = self
            .post_json(
                "/api/login",
                None,
                json!({ "email": email, "password": PASSWORD, "role": role }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login: {body}");
        (
            body["user"]["id"].as_i64().unwrap(),
            body["token"].as_str().unwrap().to_string(),
        )
    }

    pub async fn post_job(&self, recruiter_id: i64, token: &str, description: &str) -> i64 {
        let (status, body) = self
            .post_json(
                "/api/post-job",
                Some(token),
                json!({
                    "title": "Backend Engineer",
                    "description": description,
                    "recruiter_id": recruiter_id,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "post job: {body}");
        body["job_id"].as_i64().unwrap()
    }

    pub async fn apply(
        &self,
        token: &str,
        job_id: i64,
        candidate_id: i64,
        resume: Option<(&str, &[u8])>,
    ) -> (StatusCode, JsonValue) {
        let job_id = job_id.to_string();
        let candidate_id = candidate_id.to_string();
        let body = multipart_body(
            &[("job_id", job_id.as_str()), ("candidate_id", candidate_id.as_str())],
            resume,
        );
        let req = Request::builder()
            .method("POST")
            .uri("/api/apply-job")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }
}

pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
