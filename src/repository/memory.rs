//! In-memory repository with the same contract as the PostgreSQL one. Used by tests.

use super::SampleRepository;
use crate::error::AppError;
use crate::model::{NewSample, Sample};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemorySampleRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Sample>,
    next_id: i64,
}

impl MemorySampleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SampleRepository for MemorySampleRepository {
    async fn find_all(&self) -> Result<Vec<Sample>, AppError> {
        Ok(self.read().rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Sample>, AppError> {
        Ok(self.read().rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Sample>, AppError> {
        Ok(self
            .read()
            .rows
            .values()
            .filter(|s| s.name == name)
            .cloned()
            .collect())
    }

    async fn insert(&self, sample: &NewSample) -> Result<Vec<i64>, AppError> {
        let mut inner = self.write();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.insert(id, sample.clone().into_persisted(id));
        Ok(vec![id])
    }

    async fn update(&self, sample: &Sample) -> Result<u64, AppError> {
        let mut inner = self.write();
        match inner.rows.get_mut(&sample.id) {
            Some(row) => {
                row.name = sample.name.clone();
                row.updated_at = sample.updated_at;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, sample: &Sample) -> Result<u64, AppError> {
        Ok(self.write().rows.remove(&sample.id).map_or(0, |_| 1))
    }
}
