use std::sync::Arc;

use chrono::{DateTime, TimeZone};

use crate::{
    auth::SessionStore,
    config::DEFAULT_FETCH_LIMIT,
    db::{FeedbackRepository, question::get_recent_questions, rating::get_recent_ratings},
    errors::{AppError, DASHBOARD_LOAD_FAILED},
    models::{
        Question, Rating, Stats,
        dashboard::{DashboardTab, LoadStatus, TabBadges},
        stats::StatCard,
    },
    navigation::{LOGIN_PATH, Navigator},
    stats::{compute_stats, compute_stats_now, summary_cards},
};

/// Staff dashboard. Mount it only behind an authenticated
/// [`AccessGate`](crate::gate::AccessGate); the session is not checked again here.
pub struct DashboardController {
    repo: Arc<dyn FeedbackRepository>,
    auth: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    fetch_limit: usize,
    ratings: Vec<Rating>,
    questions: Vec<Question>,
    status: LoadStatus,
    active_tab: DashboardTab,
}

impl DashboardController {
    pub fn new(
        repo: Arc<dyn FeedbackRepository>,
        auth: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            repo,
            auth,
            navigator,
            fetch_limit: DEFAULT_FETCH_LIMIT,
            ratings: Vec::new(),
            questions: Vec::new(),
            status: LoadStatus::Loading,
            active_tab: DashboardTab::default(),
        }
    }

    pub fn with_fetch_limit(mut self, limit: usize) -> Self {
        self.fetch_limit = limit;
        self
    }

    /// Fetches ratings and questions concurrently. The view is only replaced
    /// when both succeed; any failure leaves it untouched and sets one
    /// user-facing error.
    pub async fn load(&mut self) -> Result<(), AppError> {
        self.status = LoadStatus::Loading;

        let result = tokio::try_join!(
            get_recent_ratings(self.repo.as_ref(), self.fetch_limit),
            get_recent_questions(self.repo.as_ref(), self.fetch_limit)
        );

        match result {
            Ok((ratings, questions)) => {
                tracing::info!(
                    "Dashboard loaded {} ratings and {} questions",
                    ratings.len(),
                    questions.len()
                );
                self.ratings = ratings;
                self.questions = questions;
                self.status = LoadStatus::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading dashboard: {}", e);
                self.status = LoadStatus::Failed(DASHBOARD_LOAD_FAILED.into());
                Err(e)
            }
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn active_tab(&self) -> DashboardTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: DashboardTab) {
        self.active_tab = tab;
    }

    pub fn badges(&self) -> TabBadges {
        TabBadges {
            ratings: self.ratings.len(),
            questions: self.questions.len(),
        }
    }

    pub fn stats(&self) -> Option<Stats> {
        compute_stats_now(&self.ratings)
    }

    pub fn stats_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<Stats> {
        compute_stats(&self.ratings, now)
    }

    pub fn summary_cards(&self) -> Option<Vec<StatCard>> {
        self.stats().map(|stats| summary_cards(&stats))
    }

    /// Ends the session and heads to the login screen. The redirect happens
    /// even when the identity service could not be reached.
    pub async fn sign_out(&self) {
        if let Err(e) = self.auth.sign_out().await {
            tracing::warn!("Sign out failed: {}", e);
        }
        self.navigator.push(LOGIN_PATH);
    }
}
