use mongodb::{
    bson::doc,
    error::{Error as MongoError, ErrorKind},
    Client as MongoClient, Collection, Database,
};
use secrecy::{ExposeSecret, Secret};
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use super::repository::StoreError;

const RETRY_INITIAL: Duration = Duration::from_secs(1);
const RETRY_MAX: Duration = Duration::from_secs(30);

/// Process-wide MongoDB handle. Cloning shares the underlying connection pool.
///
/// The driver connects lazily, but building the client still resolves SRV/TXT records for
/// `mongodb+srv://` URIs. Only a malformed connection string is fatal; any other failure is
/// logged and the client is rebuilt in the background while store calls report
/// `StoreError::Unavailable`.
#[derive(Clone)]
pub struct MongoDb {
    client: Arc<OnceCell<MongoClient>>,
    database: String,
}

impl MongoDb {
    pub async fn connect(uri: &Secret<String>, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Configuring MongoDB client");
        match MongoClient::with_uri_str(uri.expose_secret()).await {
            Ok(client) => Ok(Self {
                client: Arc::new(OnceCell::new_with(Some(client))),
                database: database.to_string(),
            }),
            Err(e) if is_malformed(&e) => {
                tracing::error!("Invalid MongoDB connection string: {}", e);
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "Invalid MongoDB connection string: {}",
                    e
                )))
            }
            Err(e) => {
                tracing::error!("MongoDB client could not be built, retrying in background: {}", e);
                let db = Self::unavailable(database);
                db.spawn_client_retry(uri.clone());
                Ok(db)
            }
        }
    }

    /// A handle with no client yet.
    pub(crate) fn unavailable(database: &str) -> Self {
        Self {
            client: Arc::new(OnceCell::new()),
            database: database.to_string(),
        }
    }

    fn spawn_client_retry(&self, uri: Secret<String>) {
        let db = self.clone();
        tokio::spawn(async move {
            let mut delay = RETRY_INITIAL;
            loop {
                tokio::time::sleep(delay).await;
                match MongoClient::with_uri_str(uri.expose_secret()).await {
                    Ok(client) => {
                        if db.client.set(client).is_ok() {
                            tracing::info!(database = %db.database, "MongoDB client ready");
                            db.spawn_connectivity_check();
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::warn!(retry_in = ?delay, "MongoDB client still unavailable: {}", e);
                        delay = (delay * 2).min(RETRY_MAX);
                    }
                }
            }
        });
    }

    /// Pings the server in the background and logs the outcome.
    pub fn spawn_connectivity_check(&self) {
        let db = self.clone();
        tokio::spawn(async move {
            match db.health_check().await {
                Ok(()) => tracing::info!(database = %db.database, "MongoDB connected"),
                Err(e) => tracing::error!("MongoDB is not reachable yet: {}", e),
            }
        });
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.client()?
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                StoreError::from(e)
            })?;
        Ok(())
    }

    pub fn client(&self) -> Result<&MongoClient, StoreError> {
        self.client.get().ok_or(StoreError::Unavailable)
    }

    pub fn database(&self) -> Result<Database, StoreError> {
        Ok(self.client()?.database(&self.database))
    }

    pub fn collection<T>(&self, name: &str) -> Result<Collection<T>, StoreError> {
        Ok(self.database()?.collection(name))
    }

    /// Closes pooled connections and stops server monitoring.
    pub async fn shutdown(self) {
        if let Some(client) = self.client.get() {
            tracing::info!("Closing MongoDB connections");
            client.clone().shutdown().await;
        }
    }
}

fn is_malformed(err: &MongoError) -> bool {
    matches!(*err.kind, ErrorKind::InvalidArgument { .. })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_uri_is_a_config_error() {
        let uri = Secret::new("postgres://localhost:5432/invoice_db".to_string());

        let result = MongoDb::connect(&uri, "invoice_db").await;

        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[tokio::test]
    async fn plain_uri_builds_without_a_server() {
        let uri = Secret::new("mongodb://localhost:27017/invoice_db".to_string());

        let db = MongoDb::connect(&uri, "invoice_db").await.unwrap();

        assert!(db.client().is_ok());
        db.shutdown().await;
    }

    #[tokio::test]
    async fn unavailable_handle_reports_store_errors() {
        let db = MongoDb::unavailable("invoice_db");

        assert!(matches!(db.client(), Err(StoreError::Unavailable)));
        assert!(matches!(
            db.collection::<mongodb::bson::Document>("invoices"),
            Err(StoreError::Unavailable)
        ));
        assert!(matches!(db.health_check().await, Err(StoreError::Unavailable)));
    }
}
