pub mod hub;
pub mod supabase;
pub mod token;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

pub use hub::{SessionHub, SessionSubscription, Unsubscribe};
pub use supabase::SupabaseAuth;
pub use token::Claims;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Proof of a signed-in identity, as handed out by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option", default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub user: SessionUser,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

/// Session capability consumed by the access gate and the dashboard.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// One-shot probe of the current session.
    async fn get_current_session(&self) -> Result<Option<Session>, AppError>;

    /// Registers a listener for later session changes.
    fn on_session_change(&self) -> SessionSubscription;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError>;

    async fn sign_out(&self) -> Result<(), AppError>;
}
