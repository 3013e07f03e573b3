use crate::errors::AppError;

pub const DEFAULT_FETCH_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub jwt_secret: Option<String>,
    pub fetch_limit: usize,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

fn required(name: &str) -> Result<String, AppError> {
    std::env::var(name).map_err(|_| AppError::EnvError(format!("{name} must be set")))
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            supabase_url: required("SUPABASE_URL")?,
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            jwt_secret: std::env::var("SUPABASE_JWT_SECRET").ok(),
            fetch_limit: std::env::var("DASHBOARD_FETCH_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(DEFAULT_FETCH_LIMIT),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        })
    }
}
