use std::collections::HashMap;
use async_trait::async_trait;
use rand::Rng;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::model::ResourceEntity;
use crate::catalog::dto::ResourceDto;
use crate::catalog::repository::ResourceRepository;
use crate::core::domain::Configuration;
use crate::core::lending::{LendingError, LendingResult, ResourceStatus};
use crate::gateway::notifier::Notifier;

pub struct CatalogServiceImpl {
    branch_id: String,
    resource_repository: Box<dyn ResourceRepository>,
    notifier: Box<dyn Notifier>,
}

impl CatalogServiceImpl {
    pub fn new(config: &Configuration, resource_repository: Box<dyn ResourceRepository>,
               notifier: Box<dyn Notifier>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            resource_repository,
            notifier,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_resource(&self, resource: &ResourceDto) -> LendingResult<ResourceDto> {
        let mut entity = ResourceEntity::from(resource);
        if entity.shelf_code.is_empty() {
            entity.shelf_code = format!("{}", rand::thread_rng().gen_range(0..1000));
        }
        self.resource_repository.create(&entity).await?;
        let _ = self.notifier.notify(self.branch_id.as_str(), "Catalog Update",
                                     format!("added {} \"{}\"", resource.kind.label(), resource.title).as_str()).await?;
        Ok(ResourceDto::from(&entity))
    }

    async fn update_resource(&self, resource: &ResourceDto) -> LendingResult<ResourceDto> {
        self.resource_repository.update(&ResourceEntity::from(resource)).await?;
        Ok(resource.clone())
    }

    async fn remove_resource(&self, id: &str) -> LendingResult<()> {
        let existing = self.resource_repository.get(id).await?;
        if existing.status == ResourceStatus::CheckedOut {
            return Err(LendingError::validation(
                format!("resource {} cannot be removed while checked out", id).as_str(),
                Some("400".to_string())));
        }
        self.resource_repository.delete(id).await?;
        let _ = self.notifier.notify(self.branch_id.as_str(), "Catalog Update",
                                     format!("removed \"{}\"", existing.title).as_str()).await?;
        Ok(())
    }

    async fn find_resource_by_id(&self, id: &str) -> LendingResult<ResourceDto> {
        self.resource_repository.get(id).await.map(|r| ResourceDto::from(&r))
    }

    async fn find_resources_by_subject(&self, subject: &str) -> LendingResult<Vec<ResourceDto>> {
        let res = self.resource_repository.query(
            &HashMap::from([("subject".to_string(), subject.to_string())]), None, 100).await?;
        Ok(res.records.iter().map(ResourceDto::from).collect())
    }

    async fn claim_resource(&self, id: &str) -> LendingResult<bool> {
        self.resource_repository.transition_status(
            id, ResourceStatus::Available, ResourceStatus::CheckedOut).await
    }

    async fn release_resource(&self, id: &str) -> LendingResult<bool> {
        self.resource_repository.transition_status(
            id, ResourceStatus::CheckedOut, ResourceStatus::Available).await
    }
}

impl From<&ResourceEntity> for ResourceDto {
    fn from(other: &ResourceEntity) -> Self {
        Self {
            resource_id: other.resource_id.to_string(),
            version: other.version,
            shelf_code: other.shelf_code.to_string(),
            title: other.title.to_string(),
            subject: other.subject.to_string(),
            kind: other.kind.clone(),
            status: other.status,
            published_at: other.published_at,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&ResourceDto> for ResourceEntity {
    fn from(other: &ResourceDto) -> Self {
        Self {
            resource_id: other.resource_id.to_string(),
            version: other.version,
            shelf_code: other.shelf_code.to_string(),
            title: other.title.to_string(),
            subject: other.subject.to_string(),
            kind: other.kind.clone(),
            status: other.status,
            published_at: other.published_at,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
