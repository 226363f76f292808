use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_notifier;
use crate::rides::domain::RideService;
use crate::rides::domain::service::RideServiceImpl;
use crate::rides::repository::mem_driver_repository::MemDriverRepository;
use crate::rides::repository::mem_ride_repository::MemRideRepository;
use crate::rides::repository::{DriverRepository, RideRepository};

pub async fn create_driver_repository(store: RepositoryStore) -> Box<dyn DriverRepository> {
    match store {
        RepositoryStore::Memory => {
            Box::new(MemDriverRepository::new())
        }
    }
}

pub async fn create_ride_repository(store: RepositoryStore) -> Box<dyn RideRepository> {
    match store {
        RepositoryStore::Memory => {
            Box::new(MemRideRepository::new())
        }
    }
}

pub async fn create_ride_service(store: RepositoryStore) -> Box<dyn RideService> {
    let driver_repo = create_driver_repository(store).await;
    let ride_repo = create_ride_repository(store).await;
    let notifier = create_notifier(store.notify_via()).await;
    Box::new(RideServiceImpl::new(driver_repo, ride_repo, notifier))
}
