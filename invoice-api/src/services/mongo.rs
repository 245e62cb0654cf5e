use async_trait::async_trait;
use futures::TryStreamExt;
use metrics::{counter, histogram};
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOneAndReplaceOptions, ReturnDocument},
    Collection,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::database::MongoDb;
use super::repository::{parse_id, Repository, StoreError};
use super::stored::MongoDocument;
use crate::models::Record;

/// On-disk shape: a native ObjectId `_id` next to the document's own fields.
#[derive(Debug, Serialize, Deserialize)]
struct StoredDocument<S> {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(flatten)]
    data: S,
}

impl<S> StoredDocument<S> {
    fn into_record<T: MongoDocument<Stored = S>>(self) -> Record<T> {
        Record::new(self.id.to_hex(), T::from_stored(self.data))
    }
}

pub struct MongoRepository<T> {
    db: MongoDb,
    resource: &'static str,
    _model: std::marker::PhantomData<fn() -> T>,
}

impl<T> MongoRepository<T>
where
    T: MongoDocument + Send + Sync,
{
    pub fn new(db: &MongoDb, collection: &'static str) -> Self {
        Self {
            db: db.clone(),
            resource: collection,
            _model: std::marker::PhantomData,
        }
    }

    fn collection(&self) -> Result<Collection<StoredDocument<T::Stored>>, StoreError> {
        self.db.collection(self.resource)
    }

    fn observe<R>(
        &self,
        operation: &'static str,
        start: Instant,
        result: &Result<R, StoreError>,
    ) {
        let outcome = if result.is_ok() { "ok" } else { "error" };
        let labels = [
            ("resource", self.resource.to_string()),
            ("operation", operation.to_string()),
            ("outcome", outcome.to_string()),
        ];
        counter!("store_operations_total", &labels).increment(1);
        histogram!("store_operation_duration_seconds", &labels)
            .record(start.elapsed().as_secs_f64());

        if let Err(e) = result {
            tracing::error!(
                resource = self.resource,
                operation,
                error = %e,
                "MongoDB operation failed"
            );
        }
    }
}

#[async_trait]
impl<T> Repository<T> for MongoRepository<T>
where
    T: MongoDocument + Send + Sync,
{
    async fn insert(&self, item: T) -> Result<Record<T>, StoreError> {
        let start = Instant::now();
        let result = async {
            let doc = StoredDocument {
                id: ObjectId::new(),
                data: item.into_stored(),
            };
            self.collection()?.insert_one(&doc, None).await?;
            Ok::<_, StoreError>(doc.into_record::<T>())
        }
        .await;
        self.observe("insert", start, &result);
        result
    }

    async fn find_all(&self) -> Result<Vec<Record<T>>, StoreError> {
        let start = Instant::now();
        let result = async {
            let cursor = self.collection()?.find(None, None).await?;
            let docs: Vec<StoredDocument<T::Stored>> = cursor.try_collect().await?;
            Ok::<_, StoreError>(
                docs.into_iter()
                    .map(StoredDocument::into_record::<T>)
                    .collect(),
            )
        }
        .await;
        self.observe("find_all", start, &result);
        result
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Record<T>>, StoreError> {
        let start = Instant::now();
        let result = async {
            let oid = parse_id(id)?;
            let found = self
                .collection()?
                .find_one(doc! { "_id": oid }, None)
                .await?;
            Ok::<_, StoreError>(found.map(StoredDocument::into_record::<T>))
        }
        .await;
        self.observe("find_by_id", start, &result);
        result
    }

    async fn replace_by_id(&self, id: &str, item: T) -> Result<Option<Record<T>>, StoreError> {
        let start = Instant::now();
        let result = async {
            let oid = parse_id(id)?;
            let options = FindOneAndReplaceOptions::builder()
                .return_document(ReturnDocument::After)
                .build();
            let replacement = StoredDocument {
                id: oid,
                data: item.into_stored(),
            };
            let updated = self
                .collection()?
                .find_one_and_replace(doc! { "_id": oid }, &replacement, options)
                .await?;
            Ok::<_, StoreError>(updated.map(StoredDocument::into_record::<T>))
        }
        .await;
        self.observe("replace_by_id", start, &result);
        result
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Record<T>>, StoreError> {
        let start = Instant::now();
        let result = async {
            let oid = parse_id(id)?;
            let deleted = self
                .collection()?
                .find_one_and_delete(doc! { "_id": oid }, None)
                .await?;
            Ok::<_, StoreError>(deleted.map(StoredDocument::into_record::<T>))
        }
        .await;
        self.observe("delete_by_id", start, &result);
        result
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.db.health_check().await
    }
}
