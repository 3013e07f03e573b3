use thiserror::Error;

use crate::validation::ValidationErrors;

pub const DASHBOARD_LOAD_FAILED: &str =
    "Fallo al conectar con la base de datos. Verifica tu conexión o recarga la página.";
pub const INVALID_CREDENTIALS: &str = "Credenciales inválidas.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Env error: {0}")]
    EnvError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error")]
    InternalError,
}
