pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::catalog::dto::ResourceDto;
use crate::core::lending::LendingResult;

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_resource(&self, resource: &ResourceDto) -> LendingResult<ResourceDto>;
    async fn update_resource(&self, resource: &ResourceDto) -> LendingResult<ResourceDto>;
    // removal is refused while the resource is checked out
    async fn remove_resource(&self, id: &str) -> LendingResult<()>;
    async fn find_resource_by_id(&self, id: &str) -> LendingResult<ResourceDto>;
    async fn find_resources_by_subject(&self, subject: &str) -> LendingResult<Vec<ResourceDto>>;
    // atomic Available -> CheckedOut transition; false when already claimed
    async fn claim_resource(&self, id: &str) -> LendingResult<bool>;
    // atomic CheckedOut -> Available transition; false when not claimed
    async fn release_resource(&self, id: &str) -> LendingResult<bool>;
}
