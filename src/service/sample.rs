//! Sample lifecycle: list, lookup, create, update, delete.

use crate::error::AppError;
use crate::model::{now, NewSample, Sample};
use crate::repository::SampleRepository;
use crate::service::validate_name;
use std::sync::Arc;

#[derive(Clone)]
pub struct SampleService {
    repo: Arc<dyn SampleRepository>,
}

impl SampleService {
    pub fn new(repo: Arc<dyn SampleRepository>) -> Self {
        SampleService { repo }
    }

    pub async fn find_all(&self) -> Result<Vec<Sample>, AppError> {
        tracing::debug!("listing samples");
        self.repo.find_all().await
    }

    /// Absence is `Ok(None)`, not an error.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Sample>, AppError> {
        tracing::debug!(id, "finding sample by id");
        self.repo.find_by_id(id).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Sample>, AppError> {
        tracing::debug!(name, "finding samples by name");
        self.repo.find_by_name(name).await
    }

    pub async fn create(&self, name: Option<&str>) -> Result<Sample, AppError> {
        tracing::info!(name = ?name, "creating sample");
        let name = validate_name(name)?;
        let new = NewSample::new(name, now());
        let ids = self.repo.insert(&new).await?;
        let id = match ids.as_slice() {
            [id] => *id,
            other => {
                return Err(AppError::Persistence(format!(
                    "insert affected {} rows",
                    other.len()
                )))
            }
        };
        tracing::info!(id, "sample created");
        Ok(new.into_persisted(id))
    }

    pub async fn update(&self, id: i64, name: Option<&str>) -> Result<Sample, AppError> {
        tracing::info!(id, name = ?name, "updating sample");
        let name = validate_name(name)?;
        let mut sample = self.require(id).await?;
        sample.touch(name, now());
        let affected = self.repo.update(&sample).await?;
        if affected != 1 {
            return Err(AppError::Persistence(format!(
                "update of id={} affected {} rows",
                id, affected
            )));
        }
        tracing::info!(id, "sample updated");
        Ok(sample)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        tracing::info!(id, "deleting sample");
        let sample = self.require(id).await?;
        let affected = self.repo.delete(&sample).await?;
        if affected != 1 {
            return Err(AppError::Persistence(format!(
                "delete of id={} affected {} rows",
                id, affected
            )));
        }
        tracing::info!(id, "sample deleted");
        Ok(())
    }

    async fn require(&self, id: i64) -> Result<Sample, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("sample not found: id={}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemorySampleRepository;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service() -> (SampleService, Arc<MemorySampleRepository>) {
        let repo = Arc::new(MemorySampleRepository::new());
        (SampleService::new(repo.clone()), repo)
    }

    /// Finds one fixed row, reports zero rows for every write and counts write calls.
    #[derive(Default)]
    struct NoRowsRepository {
        writes: AtomicUsize,
    }

    #[async_trait]
    impl SampleRepository for NoRowsRepository {
        async fn find_all(&self) -> Result<Vec<Sample>, AppError> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Sample>, AppError> {
            Ok(Some(NewSample::new("fixed".into(), now()).into_persisted(id)))
        }

        async fn find_by_name(&self, _name: &str) -> Result<Vec<Sample>, AppError> {
            Ok(Vec::new())
        }

        async fn insert(&self, _sample: &NewSample) -> Result<Vec<i64>, AppError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn update(&self, _sample: &Sample) -> Result<u64, AppError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(0)
        }

        async fn delete(&self, _sample: &Sample) -> Result<u64, AppError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(0)
        }
    }

    #[tokio::test]
    async fn create_trims_and_assigns_id() {
        let (svc, _) = service();
        let s = svc.create(Some("  Sample ")).await.unwrap();
        assert_eq!(s.id, 1);
        assert_eq!(s.name, "Sample");
        assert_eq!(s.created_at, s.updated_at);

        let found = svc.find_by_name("Sample").await.unwrap();
        assert_eq!(found, vec![s]);
    }

    #[tokio::test]
    async fn blank_names_are_rejected_without_writing() {
        let (svc, repo) = service();
        for input in [None, Some(""), Some("   ")] {
            assert!(matches!(svc.create(input).await, Err(AppError::Validation(_))));
        }
        let existing = svc.create(Some("keep")).await.unwrap();
        assert!(matches!(
            svc.update(existing.id, Some(" ")).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(repo.len(), 1);
        let reread = svc.find_by_id(existing.id).await.unwrap().unwrap();
        assert_eq!(reread, existing);
    }

    #[tokio::test]
    async fn update_refreshes_name_and_timestamp() {
        let (svc, _) = service();
        let before = svc.create(Some("old")).await.unwrap();
        let after = svc.update(before.id, Some(" new ")).await.unwrap();
        assert_eq!(after.name, "new");
        assert_eq!(after.created_at, before.created_at);

        let reread = svc.find_by_id(before.id).await.unwrap().unwrap();
        assert_eq!(reread.name, "new");
        assert!(reread.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn update_of_missing_id_is_not_found() {
        let (svc, repo) = service();
        assert!(matches!(
            svc.update(99, Some("x")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let (svc, _) = service();
        let s = svc.create(Some("gone")).await.unwrap();
        svc.delete(s.id).await.unwrap();
        assert!(svc.find_by_id(s.id).await.unwrap().is_none());
        assert!(matches!(svc.delete(s.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn find_all_lists_in_id_order() {
        let (svc, _) = service();
        for name in ["b", "a", "c"] {
            svc.create(Some(name)).await.unwrap();
        }
        let names: Vec<_> = svc
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[tokio::test]
    async fn wrong_row_counts_surface_as_persistence_errors() {
        let repo = Arc::new(NoRowsRepository::default());
        let svc = SampleService::new(repo.clone());
        assert!(matches!(svc.create(Some("x")).await, Err(AppError::Persistence(_))));
        assert!(matches!(svc.update(1, Some("x")).await, Err(AppError::Persistence(_))));
        assert!(matches!(svc.delete(1).await, Err(AppError::Persistence(_))));
        assert_eq!(repo.writes.load(Ordering::SeqCst), 3);
    }
}
