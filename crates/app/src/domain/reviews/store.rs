//! Review store.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, query_scalar};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::reviews::records::ReviewDocumentUuid;

const LIST_DOCUMENTS_WITH_MIN_RATING_SQL: &str =
    include_str!("sql/list_documents_with_min_rating.sql");

#[derive(Debug, Error)]
pub enum ReviewStoreError {
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("review store error")]
    Sql(#[from] sqlx::Error),
}

/// Review store backed by the `review_ratings` table, on its own pool.
#[derive(Debug, Clone)]
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    #[tracing::instrument(
        name = "reviews.store.documents_with_min_rating",
        skip(self),
        fields(document_count = tracing::field::Empty),
        err
    )]
    async fn documents_with_min_rating(
        &self,
        min_rating: u8,
    ) -> Result<Vec<ReviewDocumentUuid>, ReviewStoreError> {
        if !(1..=5).contains(&min_rating) {
            return Err(ReviewStoreError::InvalidRating(min_rating));
        }

        let documents: Vec<Uuid> = query_scalar(LIST_DOCUMENTS_WITH_MIN_RATING_SQL)
            .bind(i16::from(min_rating))
            .fetch_all(&self.pool)
            .await?;

        tracing::Span::current().record("document_count", documents.len());

        Ok(documents
            .into_iter()
            .map(ReviewDocumentUuid::from_uuid)
            .collect())
    }
}

#[automock]
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Identifiers of every review document rated at least `min_rating`.
    async fn documents_with_min_rating(
        &self,
        min_rating: u8,
    ) -> Result<Vec<ReviewDocumentUuid>, ReviewStoreError>;
}
