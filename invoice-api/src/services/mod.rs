pub mod database;
pub mod memory;
pub mod metrics;
pub mod mongo;
pub mod repository;
pub mod stored;

pub use database::MongoDb;
pub use memory::InMemoryRepository;
pub use metrics::{get_metrics, init_metrics};
pub use mongo::MongoRepository;
pub use repository::{Repository, StoreError};
pub use stored::MongoDocument;
