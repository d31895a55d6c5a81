//! Sample CRUD: server-rendered create/read/update/delete over one PostgreSQL table.

pub mod config;
pub mod error;
pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod model;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;
pub mod telemetry;
pub mod views;

pub use config::{AppConfig, Profile};
pub use error::{AppError, ConfigError};
pub use flash::{FlashKind, FlashMessage, FlashStore};
pub use model::{NewSample, Sample};
pub use repository::{MemorySampleRepository, PgSampleRepository, SampleRepository};
pub use routes::{app, sample_routes};
pub use schema::{check_connection, ensure_database_exists, ensure_schema, seed};
pub use service::SampleService;
pub use state::AppState;
