use std::sync::Arc;

use crate::{
    auth::{SessionHub, SessionStore, SupabaseAuth},
    config::AppConfig,
    db::{FeedbackRepository, SupabaseRepository},
    http::SupabaseClient,
    navigation::{Navigator, TracingNavigator},
};

/// Capabilities shared by the gate, the dashboard and the public forms.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn SessionStore>,
    pub repo: Arc<dyn FeedbackRepository>,
    pub navigator: Arc<dyn Navigator>,
    pub fetch_limit: usize,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        let client = SupabaseClient::from_config(config);
        let hub = SessionHub::new();

        Self {
            auth: Arc::new(SupabaseAuth::new(
                client.clone(),
                hub.clone(),
                config.jwt_secret.clone(),
            )),
            repo: Arc::new(SupabaseRepository::new(client, hub)),
            navigator: Arc::new(TracingNavigator),
            fetch_limit: config.fetch_limit,
        }
    }
}
