use crate::{
    db::{Collection, FeedbackRepository, RecentQuery},
    errors::AppError,
    models::{NewRating, Rating},
};

pub async fn get_recent_ratings(
    repo: &dyn FeedbackRepository,
    limit: usize,
) -> Result<Vec<Rating>, AppError> {
    let rows = repo
        .query(RecentQuery {
            collection: Collection::Ratings,
            limit,
        })
        .await?;

    rows.into_iter()
        .map(|row| {
            serde_json::from_value::<Rating>(row)
                .map_err(|e| AppError::Deserialization(format!("Invalid rating row: {}", e)))
        })
        .collect()
}

pub async fn insert_rating(repo: &dyn FeedbackRepository, rating: &NewRating) -> Result<(), AppError> {
    let record =
        serde_json::to_value(rating).map_err(|e| AppError::Serialization(e.to_string()))?;
    repo.insert(Collection::Ratings, record).await
}
