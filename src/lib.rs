pub mod auth;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod errors;
pub mod gate;
pub mod http;
pub mod login;
pub mod models;
pub mod navigation;
pub mod state;
pub mod stats;
pub mod submission;
pub mod validation;

use config::AppConfig;
use dashboard::DashboardController;
use errors::AppError;
use gate::{AccessGate, AccessState};
use state::AppState;

use crate::stats::EMPTY_STATS_MESSAGE;

pub async fn run() -> Result<(), AppError> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config);

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        if let Err(msg) =
            login::submit_login(state.auth.as_ref(), state.navigator.as_ref(), email, password)
                .await
        {
            tracing::warn!("{}", msg);
        }
    }

    let gate = AccessGate::mount(state.auth.clone(), state.navigator.clone());
    if gate.settled().await == AccessState::Authenticated {
        open_dashboard(&state).await;
    }
    gate.unmount();

    Ok(())
}

async fn open_dashboard(state: &AppState) {
    let mut dashboard =
        DashboardController::new(state.repo.clone(), state.auth.clone(), state.navigator.clone())
            .with_fetch_limit(state.fetch_limit);

    if dashboard.load().await.is_err() {
        if let Some(msg) = dashboard.error() {
            tracing::error!("{}", msg);
        }
        return;
    }

    let badges = dashboard.badges();
    tracing::info!(
        "Calificaciones: {} · Preguntas: {}",
        badges.ratings,
        badges.questions
    );

    match dashboard.summary_cards() {
        Some(cards) => {
            for card in cards {
                tracing::info!(
                    "{}: {} ({}){}",
                    card.label,
                    card.value,
                    card.sub,
                    card.trend.map(|t| format!(" {t}")).unwrap_or_default()
                );
            }
        }
        None => tracing::info!("{}", EMPTY_STATS_MESSAGE),
    }
}
