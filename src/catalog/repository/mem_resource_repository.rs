use std::collections::HashMap;
use std::sync::RwLock;
use async_trait::async_trait;
use chrono::Utc;
use crate::catalog::domain::model::ResourceEntity;
use crate::catalog::repository::ResourceRepository;
use crate::core::lending::{LendingError, LendingResult, PaginatedResult, ResourceStatus};
use crate::core::repository::{matches_predicate, paginate, Repository};

// In-memory resource store; all mutations run under one write lock so the
// status transition is a true compare-and-set.
pub struct MemResourceRepository {
    resources: RwLock<HashMap<String, ResourceEntity>>,
}

impl MemResourceRepository {
    pub fn new() -> Self {
        Self {
            resources: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemResourceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<ResourceEntity> for MemResourceRepository {
    async fn create(&self, entity: &ResourceEntity) -> LendingResult<usize> {
        let mut resources = self.resources.write().map_err(|_|
            LendingError::runtime("resource store lock poisoned", None))?;
        if resources.contains_key(entity.resource_id.as_str()) {
            return Err(LendingError::duplicate_key(
                format!("resource with id {} already exists", entity.resource_id).as_str()));
        }
        resources.insert(entity.resource_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &ResourceEntity) -> LendingResult<usize> {
        let mut resources = self.resources.write().map_err(|_|
            LendingError::runtime("resource store lock poisoned", None))?;
        let existing = resources.get(entity.resource_id.as_str()).ok_or_else(||
            LendingError::not_found(
                format!("resource with id {} not found", entity.resource_id).as_str()))?;
        if existing.version != entity.version {
            return Err(LendingError::unavailable(
                format!("resource {} version {} is stale", entity.resource_id, entity.version).as_str(),
                None, true));
        }
        let mut next = entity.clone();
        next.version += 1;
        next.updated_at = Utc::now().naive_utc();
        resources.insert(next.resource_id.to_string(), next);
        Ok(1)
    }

    async fn get(&self, id: &str) -> LendingResult<ResourceEntity> {
        let resources = self.resources.read().map_err(|_|
            LendingError::runtime("resource store lock poisoned", None))?;
        resources.get(id).cloned().ok_or_else(||
            LendingError::not_found(format!("resource with id {} not found", id).as_str()))
    }

    async fn delete(&self, id: &str) -> LendingResult<usize> {
        let mut resources = self.resources.write().map_err(|_|
            LendingError::runtime("resource store lock poisoned", None))?;
        resources.remove(id).map(|_| 1).ok_or_else(||
            LendingError::not_found(format!("resource with id {} not found", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LendingResult<PaginatedResult<ResourceEntity>> {
        let resources = self.resources.read().map_err(|_|
            LendingError::runtime("resource store lock poisoned", None))?;
        let mut matched = Vec::new();
        for entity in resources.values() {
            let record = serde_json::to_value(entity)?;
            if matches_predicate(&record, predicate) {
                matched.push(entity.clone());
            }
        }
        matched.sort_by(|a, b| (a.created_at, a.resource_id.as_str())
            .cmp(&(b.created_at, b.resource_id.as_str())));
        Ok(paginate(matched, page, page_size))
    }
}

#[async_trait]
impl ResourceRepository for MemResourceRepository {
    async fn transition_status(&self, id: &str, expected: ResourceStatus,
                               next: ResourceStatus) -> LendingResult<bool> {
        let mut resources = self.resources.write().map_err(|_|
            LendingError::runtime("resource store lock poisoned", None))?;
        let entity = resources.get_mut(id).ok_or_else(||
            LendingError::not_found(format!("resource with id {} not found", id).as_str()))?;
        if entity.status != expected {
            return Ok(false);
        }
        entity.status = next;
        entity.version += 1;
        entity.updated_at = Utc::now().naive_utc();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::catalog::domain::model::{ResourceEntity, ResourceKind};
    use crate::catalog::repository::mem_resource_repository::MemResourceRepository;
    use crate::catalog::repository::ResourceRepository;
    use crate::core::lending::ResourceStatus;
    use crate::core::repository::Repository;

    fn sample_book(title: &str) -> ResourceEntity {
        ResourceEntity::new(title, "subject", ResourceKind::Book {
            author: "author".to_string(),
            isbn: "isbn".to_string(),
            page_count: 100,
        })
    }

    #[tokio::test]
    async fn test_should_create_get_and_delete() {
        let repo = MemResourceRepository::new();
        let book = sample_book("title");
        repo.create(&book).await.expect("should create");
        assert!(repo.create(&book).await.is_err());

        let loaded = repo.get(book.resource_id.as_str()).await.expect("should get");
        assert_eq!(book.title, loaded.title);

        repo.delete(book.resource_id.as_str()).await.expect("should delete");
        assert!(repo.get(book.resource_id.as_str()).await.is_err());
    }

    #[tokio::test]
    async fn test_should_reject_stale_update() {
        let repo = MemResourceRepository::new();
        let mut book = sample_book("title");
        repo.create(&book).await.expect("should create");

        book.title = "new title".to_string();
        repo.update(&book).await.expect("should update");
        // the stored version moved past the caller's copy
        assert!(repo.update(&book).await.is_err());
    }

    #[tokio::test]
    async fn test_should_query_by_status() {
        let repo = MemResourceRepository::new();
        repo.create(&sample_book("one")).await.expect("should create");
        repo.create(&sample_book("two")).await.expect("should create");

        let res = repo.query(&HashMap::from([
            ("status".to_string(), "Available".to_string())]), None, 10).await.expect("should query");
        assert_eq!(2, res.records.len());
    }

    #[tokio::test]
    async fn test_should_transition_status_once() {
        let repo = MemResourceRepository::new();
        let book = sample_book("title");
        repo.create(&book).await.expect("should create");

        let claimed = repo.transition_status(book.resource_id.as_str(),
                                             ResourceStatus::Available, ResourceStatus::CheckedOut).await.expect("should claim");
        assert!(claimed);
        let claimed_again = repo.transition_status(book.resource_id.as_str(),
                                                   ResourceStatus::Available, ResourceStatus::CheckedOut).await.expect("should not claim");
        assert!(!claimed_again);

        let loaded = repo.get(book.resource_id.as_str()).await.expect("should get");
        assert_eq!(ResourceStatus::CheckedOut, loaded.status);
    }
}
