pub mod model;
pub mod service;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::core::lending::LendingResult;
use crate::pricing::Discount;
use crate::rides::dto::{DriverDto, RideDto};

#[derive(Debug, PartialEq, Clone)]
pub enum RideOutcome {
    Dispatched(RideDto),
    // every driver is currently claimed
    NoDriverAvailable,
}

#[async_trait]
pub trait RideService: Sync + Send {
    async fn register_driver(&self, driver: &DriverDto) -> LendingResult<DriverDto>;
    async fn find_driver_by_id(&self, id: &str) -> LendingResult<DriverDto>;
    // claims the first available driver; the fare strategy is fixed from the
    // request hour and travels with the ride
    async fn request_ride(&self, passenger_id: &str, pickup: &str, dropoff: &str,
                          now: NaiveDateTime) -> LendingResult<RideOutcome>;
    async fn complete_ride(&self, ride_id: &str, distance_km: f64, base_fare: f64,
                           discount: Discount, now: NaiveDateTime) -> LendingResult<RideDto>;
    // scores outside 1..=5 are ignored and reported as false
    async fn rate_ride(&self, ride_id: &str, score: i64) -> LendingResult<bool>;
    async fn ride_history(&self, participant_id: &str) -> LendingResult<Vec<RideDto>>;
}
