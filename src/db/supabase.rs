use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::{
    auth::SessionHub,
    db::{Collection, FeedbackRepository, RecentQuery},
    errors::AppError,
    http::{SupabaseClient, check_status},
};

/// Table access over the hosted REST interface. Requests carry the signed-in
/// session's token when there is one, the anonymous key otherwise.
#[derive(Clone)]
pub struct SupabaseRepository {
    client: SupabaseClient,
    hub: SessionHub,
}

impl SupabaseRepository {
    pub fn new(client: SupabaseClient, hub: SessionHub) -> Self {
        Self { client, hub }
    }

    fn bearer(&self) -> Option<String> {
        self.hub.current().map(|s| s.access_token)
    }
}

#[async_trait]
impl FeedbackRepository for SupabaseRepository {
    async fn query(&self, query: RecentQuery) -> Result<Vec<Value>, AppError> {
        let table = query.collection.table();
        let url = format!(
            "{}?select=*&order=created_at.desc&limit={}",
            self.client.rest_url(table),
            query.limit
        );
        tracing::debug!("Querying {} (limit {})", table, query.limit);

        let res = self
            .client
            .request(Method::GET, &url, self.bearer().as_deref())
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to query {}: {}", table, e)))?;
        let res = check_status(res, AppError::DatabaseError).await?;

        res.json::<Vec<Value>>()
            .await
            .map_err(|e| AppError::Deserialization(format!("Invalid {} payload: {}", table, e)))
    }

    async fn insert(&self, collection: Collection, record: Value) -> Result<(), AppError> {
        let table = collection.table();
        let url = self.client.rest_url(table);

        let res = self
            .client
            .request(Method::POST, &url, self.bearer().as_deref())
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert into {}: {}", table, e)))?;
        check_status(res, AppError::DatabaseError).await?;

        tracing::info!("Inserted record into {}", table);
        Ok(())
    }
}
