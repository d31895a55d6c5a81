//! Data-access interface for samples, with PostgreSQL and in-memory implementations.

mod memory;
mod postgres;

pub use memory::MemorySampleRepository;
pub use postgres::PgSampleRepository;

use crate::error::AppError;
use crate::model::{NewSample, Sample};
use async_trait::async_trait;

/// Persistence operations for [`Sample`]. Write methods report what the store did and
/// leave the row-count check to the caller.
#[async_trait]
pub trait SampleRepository: Send + Sync {
    /// All rows ordered by id.
    async fn find_all(&self) -> Result<Vec<Sample>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Sample>, AppError>;

    /// Exact name match, ordered by id.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Sample>, AppError>;

    /// Insert one row. Returns the ids of the rows written (one on success).
    async fn insert(&self, sample: &NewSample) -> Result<Vec<i64>, AppError>;

    /// Write name and `updated_at` for the row with `sample.id`. Returns rows affected.
    async fn update(&self, sample: &Sample) -> Result<u64, AppError>;

    /// Delete the row with `sample.id`. Returns rows affected.
    async fn delete(&self, sample: &Sample) -> Result<u64, AppError>;
}
