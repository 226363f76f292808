pub mod mem_driver_repository;
pub mod mem_ride_repository;

use async_trait::async_trait;
use crate::core::lending::LendingResult;
use crate::core::repository::Repository;
use crate::rides::domain::model::{DriverEntity, RideEntity};

#[async_trait]
pub trait DriverRepository: Repository<DriverEntity> {
    // atomically claims the first available driver, or none
    async fn claim_first_available(&self) -> LendingResult<Option<DriverEntity>>;

    // marks the driver available again; false when they were not claimed
    async fn release(&self, driver_id: &str) -> LendingResult<bool>;
}

#[async_trait]
pub trait RideRepository: Repository<RideEntity> {
    // rides where the given id is the passenger or the driver
    async fn find_by_participant(&self, participant_id: &str) -> LendingResult<Vec<RideEntity>>;
}
