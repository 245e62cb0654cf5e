use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::repository::{parse_id, Repository, StoreError};
use crate::models::Record;

/// Process-local store with the same id format and semantics as the MongoDB one.
/// Documents are kept in insertion order.
pub struct InMemoryRepository<T> {
    docs: RwLock<Vec<(ObjectId, T)>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Clone + Send + Sync,
{
    async fn insert(&self, item: T) -> Result<Record<T>, StoreError> {
        let id = ObjectId::new();
        self.docs.write().await.push((id, item.clone()));
        Ok(Record::new(id.to_hex(), item))
    }

    async fn find_all(&self) -> Result<Vec<Record<T>>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .map(|(id, item)| Record::new(id.to_hex(), item.clone()))
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Record<T>>, StoreError> {
        let oid = parse_id(id)?;
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .find(|(doc_id, _)| *doc_id == oid)
            .map(|(doc_id, item)| Record::new(doc_id.to_hex(), item.clone())))
    }

    async fn replace_by_id(&self, id: &str, item: T) -> Result<Option<Record<T>>, StoreError> {
        let oid = parse_id(id)?;
        let mut docs = self.docs.write().await;
        match docs.iter_mut().find(|(doc_id, _)| *doc_id == oid) {
            Some((_, existing)) => {
                *existing = item.clone();
                Ok(Some(Record::new(oid.to_hex(), item)))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Record<T>>, StoreError> {
        let oid = parse_id(id)?;
        let mut docs = self.docs.write().await;
        let removed = docs
            .iter()
            .position(|(doc_id, _)| *doc_id == oid)
            .map(|index| docs.remove(index));
        Ok(removed.map(|(doc_id, item)| Record::new(doc_id.to_hex(), item)))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_then_find_returns_same_document() {
        let repo = InMemoryRepository::new();
        let created = repo.insert("first".to_string()).await.unwrap();

        let found = repo.find_by_id(&created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let repo = InMemoryRepository::new();
        for name in ["a", "b", "c"] {
            repo.insert(name.to_string()).await.unwrap();
        }

        let all: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.data)
            .collect();
        assert_eq!(all, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn replace_missing_document_returns_none() {
        let repo = InMemoryRepository::new();
        let missing = ObjectId::new().to_hex();

        let replaced = repo.replace_by_id(&missing, "x".to_string()).await.unwrap();
        assert!(replaced.is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_overwrites_and_keeps_id() {
        let repo = InMemoryRepository::new();
        let created = repo.insert("old".to_string()).await.unwrap();

        let replaced = repo
            .replace_by_id(&created.id, "new".to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.data, "new");
    }

    #[tokio::test]
    async fn second_delete_finds_nothing() {
        let repo = InMemoryRepository::new();
        let created = repo.insert("gone".to_string()).await.unwrap();

        assert!(repo.delete_by_id(&created.id).await.unwrap().is_some());
        assert!(repo.delete_by_id(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_id_is_rejected() {
        let repo: InMemoryRepository<String> = InMemoryRepository::new();

        let err = repo.find_by_id("not-an-id").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(id) if id == "not-an-id"));
    }
}
