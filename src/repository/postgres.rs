//! PostgreSQL-backed repository: parameterized queries against `sample_table`.

use super::SampleRepository;
use crate::error::AppError;
use crate::model::{NewSample, Sample, SAMPLE_TABLE};
use async_trait::async_trait;
use sqlx::PgPool;

const COLUMNS: &str = "id, name, created_at, updated_at";

#[derive(Clone)]
pub struct PgSampleRepository {
    pool: PgPool,
}

impl PgSampleRepository {
    pub fn new(pool: PgPool) -> Self {
        PgSampleRepository { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SampleRepository for PgSampleRepository {
    async fn find_all(&self) -> Result<Vec<Sample>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", COLUMNS, SAMPLE_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Sample>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Sample>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, SAMPLE_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Sample>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Sample>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE name = $1 ORDER BY id",
            COLUMNS, SAMPLE_TABLE
        );
        tracing::debug!(sql = %sql, name, "query");
        let rows = sqlx::query_as::<_, Sample>(&sql)
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, sample: &NewSample) -> Result<Vec<i64>, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, created_at, updated_at) VALUES ($1, $2, $3) RETURNING id",
            SAMPLE_TABLE
        );
        tracing::debug!(sql = %sql, name = %sample.name, "query");
        let ids: Vec<(i64,)> = sqlx::query_as(&sql)
            .bind(&sample.name)
            .bind(sample.created_at)
            .bind(sample.updated_at)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    async fn update(&self, sample: &Sample) -> Result<u64, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $1, updated_at = $2 WHERE id = $3",
            SAMPLE_TABLE
        );
        tracing::debug!(sql = %sql, id = sample.id, "query");
        let result = sqlx::query(&sql)
            .bind(&sample.name)
            .bind(sample.updated_at)
            .bind(sample.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, sample: &Sample) -> Result<u64, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", SAMPLE_TABLE);
        tracing::debug!(sql = %sql, id = sample.id, "query");
        let result = sqlx::query(&sql)
            .bind(sample.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
