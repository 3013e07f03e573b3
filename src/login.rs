use crate::{
    auth::SessionStore,
    errors::INVALID_CREDENTIALS,
    navigation::{DASHBOARD_PATH, Navigator},
};

/// Signs in with email and password. On success the dashboard is opened;
/// on failure the message to show is returned and nothing navigates.
pub async fn submit_login(
    auth: &dyn SessionStore,
    navigator: &dyn Navigator,
    email: &str,
    password: &str,
) -> Result<(), String> {
    match auth.sign_in(email, password).await {
        Ok(_) => {
            navigator.push(DASHBOARD_PATH);
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Login failed for {}: {}", email, e);
            Err(INVALID_CREDENTIALS.to_string())
        }
    }
}
