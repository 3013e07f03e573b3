use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use crate::{
    auth::{Session, SessionHub, SessionStore, SessionSubscription, token::decode_claims},
    errors::AppError,
    http::{SupabaseClient, check_status},
};

/// Password sign-in against the hosted identity service, with the session
/// cached locally in a [`SessionHub`].
#[derive(Clone)]
pub struct SupabaseAuth {
    client: SupabaseClient,
    hub: SessionHub,
    jwt_secret: Option<String>,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient, hub: SessionHub, jwt_secret: Option<String>) -> Self {
        Self {
            client,
            hub,
            jwt_secret,
        }
    }
}

#[async_trait]
impl SessionStore for SupabaseAuth {
    async fn get_current_session(&self) -> Result<Option<Session>, AppError> {
        let Some(session) = self.hub.current() else {
            return Ok(None);
        };

        if session.is_expired() {
            tracing::info!("Cached session for {} has expired", session.user.id);
            self.hub.publish(None);
            return Ok(None);
        }

        if let Some(secret) = &self.jwt_secret {
            decode_claims(&session.access_token, Some(secret))?;
        }

        Ok(Some(session))
    }

    fn on_session_change(&self) -> SessionSubscription {
        self.hub.subscribe()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let url = self.client.auth_url("token?grant_type=password");
        let res = self
            .client
            .request(Method::POST, &url, None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let res = check_status(res, AppError::AuthError).await?;

        let session: Session = res
            .json()
            .await
            .map_err(|e| AppError::Deserialization(format!("Invalid session payload: {}", e)))?;

        tracing::info!("Signed in as {}", session.user.id);
        self.hub.publish(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        let token = self.hub.current().map(|s| s.access_token);

        // The local session is dropped no matter what the service answers.
        self.hub.publish(None);

        let Some(token) = token else {
            return Ok(());
        };

        let url = self.client.auth_url("logout");
        let res = self
            .client
            .request(Method::POST, &url, Some(&token))
            .send()
            .await?;
        check_status(res, AppError::AuthError).await?;

        tracing::info!("Signed out");
        Ok(())
    }
}
