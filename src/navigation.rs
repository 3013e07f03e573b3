pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin";

/// Whatever owns the address bar.
pub trait Navigator: Send + Sync {
    /// Navigate without leaving the current entry in history.
    fn replace(&self, path: &str);

    fn push(&self, path: &str);
}

/// Navigator for headless runs: navigations are only logged.
#[derive(Debug, Default, Clone)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn replace(&self, path: &str) {
        tracing::info!("Navigate (replace) -> {}", path);
    }

    fn push(&self, path: &str) {
        tracing::info!("Navigate -> {}", path);
    }
}
