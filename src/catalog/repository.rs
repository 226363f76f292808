pub mod mem_resource_repository;

use async_trait::async_trait;
use crate::catalog::domain::model::ResourceEntity;
use crate::core::lending::{LendingResult, ResourceStatus};
use crate::core::repository::Repository;

#[async_trait]
pub trait ResourceRepository: Repository<ResourceEntity> {
    // Compare-and-set on the status flag; false when the resource is not in
    // the expected state, with no other change.
    async fn transition_status(&self, id: &str, expected: ResourceStatus,
                               next: ResourceStatus) -> LendingResult<bool>;
}
