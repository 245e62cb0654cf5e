use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub store: StoreBackend,
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Full connection string; takes precedence over the individual parts.
    pub uri: Option<Secret<String>>,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub host: String,
    pub srv: bool,
    pub database: String,
}

impl MongoConfig {
    /// Builds the connection string. SRV (Atlas) URIs get the retryable-write options
    /// the cluster expects.
    pub fn connection_uri(&self) -> Secret<String> {
        if let Some(uri) = &self.uri {
            return uri.clone();
        }

        let scheme = if self.srv { "mongodb+srv" } else { "mongodb" };
        let credentials = match (&self.username, &self.password) {
            (Some(user), Some(pass)) => format!(
                "{}:{}@",
                urlencoding::encode(user),
                urlencoding::encode(pass.expose_secret())
            ),
            (Some(user), None) => format!("{}@", urlencoding::encode(user)),
            _ => String::new(),
        };
        let options = if self.srv {
            "?retryWrites=true&w=majority"
        } else {
            ""
        };

        Secret::new(format!(
            "{}://{}{}/{}{}",
            scheme, credentials, self.host, self.database, options
        ))
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        // Handles .env, the configuration file and APP__/PORT
        let common = core_config::Config::load()?;

        let environment = match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "dev".to_string())
            .to_lowercase()
            .as_str()
        {
            "prod" | "production" => Environment::Prod,
            _ => Environment::Dev,
        };
        let is_prod = environment == Environment::Prod;

        let store = get_env("STORE_BACKEND", Some("mongodb"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let srv = get_env("DB_SRV", Some("false"), is_prod)?
            .parse::<bool>()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid DB_SRV: {}", e)))?;

        Ok(ApiConfig {
            common,
            environment,
            service_name: get_env("SERVICE_NAME", Some("invoice-api"), false)?,
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: get_env("LOG_LEVEL", Some("info"), false)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok(),
            store,
            mongodb: MongoConfig {
                uri: env::var("MONGODB_URI").ok().map(Secret::new),
                username: env::var("DB_USERNAME").ok(),
                password: env::var("DB_PASSWORD").ok().map(Secret::new),
                host: get_env("DB_HOST", Some("localhost:27017"), is_prod)?,
                srv,
                database: get_env("DB_NAME", Some("invoice_db"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
