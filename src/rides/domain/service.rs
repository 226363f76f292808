use async_trait::async_trait;
use chrono::{NaiveDateTime, Timelike};
use crate::core::lending::{LendingError, LendingResult, RideStatus};
use crate::gateway::notifier::Notifier;
use crate::pricing::{Discount, Pricing};
use crate::rides::domain::{RideOutcome, RideService};
use crate::rides::domain::model::{DriverEntity, RideEntity};
use crate::rides::dto::{DriverDto, RideDto};
use crate::rides::repository::{DriverRepository, RideRepository};

pub struct RideServiceImpl {
    driver_repository: Box<dyn DriverRepository>,
    ride_repository: Box<dyn RideRepository>,
    notifier: Box<dyn Notifier>,
}

impl RideServiceImpl {
    pub fn new(driver_repository: Box<dyn DriverRepository>,
               ride_repository: Box<dyn RideRepository>,
               notifier: Box<dyn Notifier>) -> Self {
        Self {
            driver_repository,
            ride_repository,
            notifier,
        }
    }
}

#[async_trait]
impl RideService for RideServiceImpl {
    async fn register_driver(&self, driver: &DriverDto) -> LendingResult<DriverDto> {
        let entity = DriverEntity::from(driver);
        self.driver_repository.create(&entity).await?;
        tracing::info!(driver_id = entity.driver_id, name = entity.name, "registered driver");
        Ok(DriverDto::from(&entity))
    }

    async fn find_driver_by_id(&self, id: &str) -> LendingResult<DriverDto> {
        let entity = self.driver_repository.get(id).await?;
        Ok(DriverDto::from(&entity))
    }

    async fn request_ride(&self, passenger_id: &str, pickup: &str, dropoff: &str,
                          now: NaiveDateTime) -> LendingResult<RideOutcome> {
        let driver = match self.driver_repository.claim_first_available().await? {
            Some(driver) => driver,
            None => {
                tracing::warn!(passenger_id, "no driver available");
                return Ok(RideOutcome::NoDriverAvailable);
            }
        };
        let pricing = Pricing::for_hour(now.hour());
        let ride = RideEntity::new(passenger_id, driver.driver_id.as_str(),
                                   pickup, dropoff, pricing, now);
        self.ride_repository.create(&ride).await?;
        let _ = self.notifier.notify(passenger_id, "Ride Dispatched",
                                     format!("{} is on the way in a {} {} ({} fare)",
                                             driver.name, driver.vehicle.make,
                                             driver.vehicle.model, pricing).as_str()).await?;
        Ok(RideOutcome::Dispatched(RideDto::from(&ride)))
    }

    async fn complete_ride(&self, ride_id: &str, distance_km: f64, base_fare: f64,
                           discount: Discount, now: NaiveDateTime) -> LendingResult<RideDto> {
        let mut ride = self.ride_repository.get(ride_id).await?;
        if ride.status == RideStatus::Completed {
            return Err(LendingError::validation(
                format!("ride {} is already completed", ride_id).as_str(), None));
        }
        // the fare goes through the strategy fixed at dispatch
        let fare = discount.apply(ride.pricing.fare(distance_km, base_fare));
        ride.status = RideStatus::Completed;
        ride.fare = Some(fare);
        ride.completed_at = Some(now);
        self.ride_repository.update(&ride).await?;
        self.driver_repository.release(ride.driver_id.as_str()).await?;
        let _ = self.notifier.notify(ride.passenger_id.as_str(), "Ride Completed",
                                     format!("fare for {} to {} is ${:.2}",
                                             ride.pickup, ride.dropoff, fare).as_str()).await?;
        Ok(RideDto::from(&ride))
    }

    async fn rate_ride(&self, ride_id: &str, score: i64) -> LendingResult<bool> {
        let mut ride = self.ride_repository.get(ride_id).await?;
        if !(1..=5).contains(&score) {
            tracing::warn!(ride_id, score, "ignoring out of range rating");
            return Ok(false);
        }
        ride.ratings.push(score);
        self.ride_repository.update(&ride).await?;
        Ok(true)
    }

    async fn ride_history(&self, participant_id: &str) -> LendingResult<Vec<RideDto>> {
        let rides = self.ride_repository.find_by_participant(participant_id).await?;
        Ok(rides.iter().map(RideDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::core::lending::RideStatus;
    use crate::core::repository::RepositoryStore;
    use crate::pricing::{Discount, Pricing};
    use crate::rides::domain::model::VehicleInfo;
    use crate::rides::domain::{RideOutcome, RideService};
    use crate::rides::dto::DriverDto;
    use crate::rides::factory::create_ride_service;

    fn vehicle() -> VehicleInfo {
        VehicleInfo {
            make: "Toyota".to_string(),
            model: "Prius".to_string(),
            plate: "ABC-123".to_string(),
        }
    }

    fn at_hour(hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_should_dispatch_and_complete_ride() {
        let svc = create_ride_service(RepositoryStore::Memory).await;
        let driver = svc.register_driver(&DriverDto::new("Alice", "alice@rides.io", vehicle()))
            .await.expect("should register");

        // eight in the morning picks the peak strategy
        let outcome = svc.request_ride("p1", "Airport", "Downtown", at_hour(8))
            .await.expect("should dispatch");
        let ride = match outcome {
            RideOutcome::Dispatched(ride) => ride,
            other => panic!("expected a dispatch, got {:?}", other),
        };
        assert_eq!(driver.driver_id, ride.driver_id);
        assert_eq!(Pricing::Peak, ride.pricing);

        // ten kilometers on a five dollar base, ten percent off peak 32.50
        let completed = svc.complete_ride(ride.ride_id.as_str(), 10.0, 5.0,
                                          Discount::percentage(10.0).expect("valid"),
                                          at_hour(9)).await.expect("should complete");
        assert_eq!(RideStatus::Completed, completed.status);
        assert_eq!(Some(29.25), completed.fare);

        // the driver is claimable again
        let loaded = svc.find_driver_by_id(driver.driver_id.as_str()).await.expect("should find");
        assert!(loaded.available);
    }

    #[tokio::test]
    async fn test_should_report_no_driver_available() {
        let svc = create_ride_service(RepositoryStore::Memory).await;
        let outcome = svc.request_ride("p1", "A", "B", at_hour(12)).await.expect("should refuse");
        assert_eq!(RideOutcome::NoDriverAvailable, outcome);

        svc.register_driver(&DriverDto::new("Bob", "bob@rides.io", vehicle()))
            .await.expect("should register");
        let first = svc.request_ride("p1", "A", "B", at_hour(12)).await.expect("dispatch");
        assert!(matches!(first, RideOutcome::Dispatched(_)));
        // the only driver is claimed now
        let second = svc.request_ride("p2", "C", "D", at_hour(12)).await.expect("refuse");
        assert_eq!(RideOutcome::NoDriverAvailable, second);
    }

    #[tokio::test]
    async fn test_should_ignore_out_of_range_ratings() {
        let svc = create_ride_service(RepositoryStore::Memory).await;
        svc.register_driver(&DriverDto::new("Carol", "carol@rides.io", vehicle()))
            .await.expect("should register");
        let ride = match svc.request_ride("p1", "A", "B", at_hour(12)).await.expect("dispatch") {
            RideOutcome::Dispatched(ride) => ride,
            other => panic!("expected a dispatch, got {:?}", other),
        };
        svc.complete_ride(ride.ride_id.as_str(), 2.0, 5.0, Discount::None, at_hour(13))
            .await.expect("should complete");

        assert!(!svc.rate_ride(ride.ride_id.as_str(), 0).await.expect("should ignore"));
        assert!(!svc.rate_ride(ride.ride_id.as_str(), 6).await.expect("should ignore"));
        assert!(svc.rate_ride(ride.ride_id.as_str(), 5).await.expect("should record"));
        assert!(svc.rate_ride(ride.ride_id.as_str(), 4).await.expect("should record"));

        let history = svc.ride_history("p1").await.expect("should list");
        assert_eq!(1, history.len());
        assert_eq!(vec![5, 4], history[0].ratings);
    }

    #[tokio::test]
    async fn test_should_refuse_completing_a_completed_ride() {
        let svc = create_ride_service(RepositoryStore::Memory).await;
        svc.register_driver(&DriverDto::new("Dave", "dave@rides.io", vehicle()))
            .await.expect("should register");
        let ride = match svc.request_ride("p1", "A", "B", at_hour(12)).await.expect("dispatch") {
            RideOutcome::Dispatched(ride) => ride,
            other => panic!("expected a dispatch, got {:?}", other),
        };
        svc.complete_ride(ride.ride_id.as_str(), 2.0, 5.0, Discount::None, at_hour(13))
            .await.expect("should complete");
        assert!(svc.complete_ride(ride.ride_id.as_str(), 2.0, 5.0, Discount::None, at_hour(14))
            .await.is_err());
    }
}
