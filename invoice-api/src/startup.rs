use axum::{body::Body, middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::{security_headers_middleware, DOCS_PREFIX},
    tracing::{make_request_span, request_id_middleware},
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{ApiConfig, StoreBackend};
use crate::handlers;
use crate::models::{Contact, Invoice};
use crate::services::{InMemoryRepository, MongoDb, MongoRepository, Repository};
use crate::ApiDoc;

pub const INVOICES_COLLECTION: &str = "invoices";
pub const CONTACTS_COLLECTION: &str = "contacts";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub invoices: Arc<dyn Repository<Invoice>>,
    pub contacts: Arc<dyn Repository<Contact>>,
}

pub fn build_router(state: AppState) -> Router {
    let invoice_routes = Router::new()
        .route(
            "/",
            get(handlers::invoices::list_invoices).post(handlers::invoices::create_invoice),
        )
        .route(
            "/:id",
            get(handlers::invoices::get_invoice)
                .put(handlers::invoices::update_invoice)
                .delete(handlers::invoices::delete_invoice),
        );

    let contact_routes = Router::new()
        .route(
            "/",
            get(handlers::contacts::list_contacts).post(handlers::contacts::create_contact),
        )
        .route(
            "/:id",
            get(handlers::contacts::get_contact)
                .put(handlers::contacts::update_contact)
                .delete(handlers::contacts::delete_contact),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .nest("/api/invoices", invoice_routes)
        .nest("/api/contacts", contact_routes)
        .merge(SwaggerUi::new(DOCS_PREFIX).url(OPENAPI_PATH, ApiDoc::openapi()))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
}

/// Owns the listener, the router and the store handle for one server lifetime.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    mongo: Option<MongoDb>,
}

impl Application {
    pub async fn build(config: ApiConfig) -> Result<Self, AppError> {
        let (state, mongo) = match config.store {
            StoreBackend::MongoDb => {
                let db = MongoDb::connect(
                    &config.mongodb.connection_uri(),
                    &config.mongodb.database,
                )
                .await?;
                db.spawn_connectivity_check();

                let state = AppState {
                    config: config.clone(),
                    invoices: Arc::new(MongoRepository::<Invoice>::new(&db, INVOICES_COLLECTION)),
                    contacts: Arc::new(MongoRepository::<Contact>::new(&db, CONTACTS_COLLECTION)),
                };
                (state, Some(db))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                let state = AppState {
                    config: config.clone(),
                    invoices: Arc::new(InMemoryRepository::<Invoice>::new()),
                    contacts: Arc::new(InMemoryRepository::<Contact>::new()),
                };
                (state, None)
            }
        };

        let router = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router,
            mongo,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn mongo(&self) -> Option<&MongoDb> {
        self.mongo.as_ref()
    }

    /// Serves until `shutdown` resolves, then closes the store handle.
    pub async fn run_until(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> std::io::Result<()> {
        tracing::info!(port = self.port, "Listening");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        if let Some(db) = self.mongo {
            db.shutdown().await;
        }
        Ok(())
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_until(std::future::pending()).await
    }
}
