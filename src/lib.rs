pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    application_service::ApplicationService,
    job_service::JobService,
    ranking_service::{KeywordScorer, RankingService, ScoringStrategy},
    storage_service::ResumeStorage,
    user_service::UserService,
};
use crate::utils::token::SessionTokens;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: SessionTokens,
    pub user_service: UserService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub ranking_service: RankingService,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        Self::with_scorer(pool, config, Arc::new(KeywordScorer::default()))
    }

    pub fn with_scorer(pool: PgPool, config: &Config, scorer: Arc<dyn ScoringStrategy>) -> Self {
        let tokens = SessionTokens::new(&config.jwt_secret, config.token_ttl_hours);
        let storage = ResumeStorage::new(config.uploads_dir.clone(), config.max_resume_bytes);

        let user_service = UserService::new(pool.clone(), tokens.clone());
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone(), storage);
        let ranking_service = RankingService::new(scorer);

        Self {
            pool,
            tokens,
            user_service,
            job_service,
            application_service,
            ranking_service,
        }
    }
}
