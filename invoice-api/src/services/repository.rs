use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::models::Record;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The id is not a 24-character hex ObjectId.
    #[error("Invalid id \"{0}\": expected a 24 character hex ObjectId")]
    InvalidId(String),

    /// No MongoDB client could be built yet.
    #[error("MongoDB client is not available")]
    Unavailable,

    #[error(transparent)]
    Backend(#[from] mongodb::error::Error),
}

/// Single-collection document store. Every HTTP operation maps to exactly one call.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    async fn insert(&self, item: T) -> Result<Record<T>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Record<T>>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Record<T>>, StoreError>;

    /// Replaces the whole document and returns the new value, `None` if absent.
    async fn replace_by_id(&self, id: &str, item: T) -> Result<Option<Record<T>>, StoreError>;

    /// Removes the document and returns what was deleted, `None` if absent.
    async fn delete_by_id(&self, id: &str) -> Result<Option<Record<T>>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

pub(crate) fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}
