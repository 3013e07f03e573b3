pub mod question;
pub mod rating;
pub mod supabase;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AppError;

pub use supabase::SupabaseRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Ratings,
    Questions,
}

impl Collection {
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Ratings => "ratings",
            Collection::Questions => "questions",
        }
    }
}

/// Most recent records first, by `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentQuery {
    pub collection: Collection,
    pub limit: usize,
}

/// Record storage for submitted feedback. Records come back as raw JSON rows.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn query(&self, query: RecentQuery) -> Result<Vec<Value>, AppError>;

    async fn insert(&self, collection: Collection, record: Value) -> Result<(), AppError>;
}
