//! Common test utilities for invoice-api integration tests.

#![allow(dead_code)]

use invoice_api::config::{ApiConfig, Environment, MongoConfig, StoreBackend};
use invoice_api::startup::Application;
use secrecy::Secret;
use serde_json::{json, Value};
use service_core::config::Config as CommonConfig;
use std::sync::Once;
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("warn,invoice_api=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn test_config(store: StoreBackend) -> ApiConfig {
    ApiConfig {
        common: CommonConfig { port: 0 },
        environment: Environment::Dev,
        service_name: "invoice-api-test".to_string(),
        service_version: "test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        store,
        mongodb: MongoConfig {
            uri: std::env::var("MONGODB_URI").ok().map(Secret::new),
            username: None,
            password: None,
            host: "localhost:27017".to_string(),
            srv: false,
            database: format!("invoice_test_{}", Uuid::new_v4().simple()),
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub app_db: Option<invoice_api::services::MongoDb>,
    client: reqwest::Client,
}

impl TestApp {
    /// Spawns the application on a random port with the in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with(StoreBackend::Memory).await
    }

    pub async fn spawn_with(store: StoreBackend) -> Self {
        init_tracing();

        let app = Application::build(test_config(store))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let app_db = app.mongo().cloned();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();

        // Wait for the server to accept connections
        for _ in 0..50 {
            if client
                .get(format!("{}/health", address))
                .send()
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            port,
            app_db,
            client,
        }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Drops the per-test MongoDB database, if one was used.
    pub async fn cleanup(&self) {
        if let Some(Ok(db)) = self.app_db.as_ref().map(|db| db.database()) {
            let _ = db.drop(None).await;
        }
    }
}

/// An id that is well-formed but never assigned.
pub fn unknown_id() -> String {
    mongodb::bson::oid::ObjectId::new().to_hex()
}

pub fn address(line1: &str, city: &str) -> Value {
    json!({
        "line1": line1,
        "city": city,
        "state": "Karnataka",
        "country": "India",
        "pincode": "560001"
    })
}

pub fn contact_payload(name: &str) -> Value {
    json!({
        "name": name,
        "contactType": "vendor",
        "address": address("1 Rd", "Bengaluru")
    })
}

pub fn invoice_payload(number: &str) -> Value {
    json!({
        "date": "2024-07-01T00:00:00Z",
        "invoiceNumber": number,
        "workOrderNumber": "WO-118",
        "ratePerHour": 85.0,
        "currency": "USD",
        "totalHours": 16.0,
        "totalAmount": 1360.0,
        "subContractor": {
            "name": "Acme Consulting",
            "address": address("12 MG Road", "Bengaluru")
        },
        "billTo": {
            "name": "Globex Corp",
            "address": {
                "line1": "500 Market St",
                "line2": "Suite 4",
                "city": "San Francisco",
                "state": "CA",
                "country": "USA",
                "pincode": "94105"
            }
        },
        "timesheets": [
            {
                "weekNumber": "27",
                "weekDuration": "2024-07-01 - 2024-07-05",
                "workHours": [
                    { "date": "2024-07-01T00:00:00Z", "hours": 8.0, "totalAmount": 680.0 },
                    { "date": "2024-07-02T00:00:00Z", "hours": 8.0, "totalAmount": 680.0, "comments": "On site" }
                ]
            }
        ]
    })
}
