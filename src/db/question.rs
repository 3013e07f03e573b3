use crate::{
    db::{Collection, FeedbackRepository, RecentQuery},
    errors::AppError,
    models::{NewQuestion, Question},
};

pub async fn get_recent_questions(
    repo: &dyn FeedbackRepository,
    limit: usize,
) -> Result<Vec<Question>, AppError> {
    let rows = repo
        .query(RecentQuery {
            collection: Collection::Questions,
            limit,
        })
        .await?;

    rows.into_iter()
        .map(|row| {
            serde_json::from_value::<Question>(row)
                .map_err(|e| AppError::Deserialization(format!("Invalid question row: {}", e)))
        })
        .collect()
}

pub async fn insert_question(
    repo: &dyn FeedbackRepository,
    question: &NewQuestion,
) -> Result<(), AppError> {
    let record =
        serde_json::to_value(question).map_err(|e| AppError::Serialization(e.to_string()))?;
    repo.insert(Collection::Questions, record).await
}
