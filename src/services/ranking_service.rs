//! Heuristic ranking of a job's applicants.
//!
//! Scores are recomputed on every request and never stored. The scoring rule
//! sits behind [`ScoringStrategy`] so a content-based scorer can replace the
//! filename heuristic without touching callers.

use std::cmp::Ordering;
use std::sync::Arc;

use rand::Rng;

use crate::dto::ranking_dto::{RankApplication, RankedApplication};
use crate::models::job::Job;

pub const DEFAULT_KEYWORDS: [&str; 6] = [
    "senior",
    "experienced",
    "python",
    "react",
    "javascript",
    "php",
];

const BASE_SCORE: f64 = 0.5;
const FILENAME_BONUS: f64 = 0.1;
const DESCRIPTION_BONUS: f64 = 0.2;
const DEFAULT_MAX_JITTER: f64 = 0.3;

#[cfg_attr(test, mockall::automock)]
pub trait ScoringStrategy: Send + Sync {
    /// Relevance of `application` to `job`. Values outside [0, 1] are clamped by the caller.
    fn score(&self, job: &Job, application: &RankApplication) -> f64;
}

/// Keyword matching against the resume filename, plus random jitter.
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    keywords: Vec<String>,
    max_jitter: f64,
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().map(|k| k.to_string()), DEFAULT_MAX_JITTER)
    }
}

impl KeywordScorer {
    pub fn new(keywords: impl IntoIterator<Item = String>, max_jitter: f64) -> Self {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            max_jitter: max_jitter.max(0.0),
        }
    }

    fn jitter(&self) -> f64 {
        let steps = (self.max_jitter * 1000.0).round() as u32;
        if steps == 0 {
            return 0.0;
        }
        f64::from(rand::thread_rng().gen_range(0..=steps)) / 1000.0
    }

    fn keyword_bonus(&self, filename: &str, description: &str) -> f64 {
        self.keywords
            .iter()
            .filter(|keyword| filename.contains(keyword.as_str()))
            .map(|keyword| {
                if description.contains(keyword.as_str()) {
                    FILENAME_BONUS + DESCRIPTION_BONUS
                } else {
                    FILENAME_BONUS
                }
            })
            .sum()
    }
}

impl ScoringStrategy for KeywordScorer {
    fn score(&self, job: &Job, application: &RankApplication) -> f64 {
        let bonus = match application.resume_filename.as_deref() {
            Some(filename) if !filename.is_empty() => self.keyword_bonus(
                &filename.to_lowercase(),
                &job.description.to_lowercase(),
            ),
            _ => 0.0,
        };
        (BASE_SCORE + bonus + self.jitter()).min(1.0)
    }
}

/// Scores every application and sorts best first. The sort is stable, so
/// equal scores keep their input order.
pub fn rank_with(
    scorer: &dyn ScoringStrategy,
    job: &Job,
    applications: Vec<RankApplication>,
) -> Vec<RankedApplication> {
    let mut ranked: Vec<RankedApplication> = applications
        .into_iter()
        .map(|application| {
            let raw = scorer.score(job, &application);
            let score = if raw.is_finite() { raw.clamp(0.0, 1.0) } else { 0.0 };
            RankedApplication { application, score }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
}

#[derive(Clone)]
pub struct RankingService {
    scorer: Arc<dyn ScoringStrategy>,
}

impl RankingService {
    pub fn new(scorer: Arc<dyn ScoringStrategy>) -> Self {
        Self { scorer }
    }

    /// Ranks against a job the caller has already loaded and authorized.
    pub fn rank(&self, job: &Job, applications: Vec<RankApplication>) -> Vec<RankedApplication> {
        let count = applications.len();
        let ranked = rank_with(self.scorer.as_ref(), job, applications);
        tracing::debug!(job_id = job.id, count, "Ranked applications");
        ranked
    }
}
