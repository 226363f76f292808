use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::lending::RideStatus;
use crate::pricing::Pricing;
use crate::rides::dto::{DriverDto, RideDto};
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub make: String,
    pub model: String,
    pub plate: String,
}

// DriverEntity abstracts a driver whose availability flips as rides claim and
// release them.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DriverEntity {
    pub driver_id: String,
    pub version: i64,
    pub name: String,
    pub email: String,
    pub vehicle: VehicleInfo,
    pub available: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl Identifiable for DriverEntity {
    fn id(&self) -> String {
        self.driver_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// RideEntity abstracts one occupancy window of a driver by a passenger. The
// fare strategy is fixed at dispatch and the fare itself is assessed once, at
// completion.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RideEntity {
    pub ride_id: String,
    pub version: i64,
    pub passenger_id: String,
    pub driver_id: String,
    pub pickup: String,
    pub dropoff: String,
    pub status: RideStatus,
    pub pricing: Pricing,
    pub fare: Option<f64>,
    pub ratings: Vec<i64>,
    #[serde(with = "serializer")]
    pub requested_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl RideEntity {
    pub fn new(passenger_id: &str, driver_id: &str, pickup: &str, dropoff: &str,
               pricing: Pricing, now: NaiveDateTime) -> Self {
        Self {
            ride_id: Uuid::new_v4().to_string(),
            version: 0,
            passenger_id: passenger_id.to_string(),
            driver_id: driver_id.to_string(),
            pickup: pickup.to_string(),
            dropoff: dropoff.to_string(),
            status: RideStatus::Dispatched,
            pricing,
            fare: None,
            ratings: vec![],
            requested_at: now,
            completed_at: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        Some(self.ratings.iter().sum::<i64>() as f64 / self.ratings.len() as f64)
    }
}

impl Identifiable for RideEntity {
    fn id(&self) -> String {
        self.ride_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl From<&DriverDto> for DriverEntity {
    fn from(other: &DriverDto) -> DriverEntity {
        DriverEntity {
            driver_id: other.driver_id.to_string(),
            version: other.version,
            name: other.name.to_string(),
            email: other.email.to_string(),
            vehicle: other.vehicle.clone(),
            available: other.available,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&DriverEntity> for DriverDto {
    fn from(other: &DriverEntity) -> DriverDto {
        DriverDto {
            driver_id: other.driver_id.to_string(),
            version: other.version,
            name: other.name.to_string(),
            email: other.email.to_string(),
            vehicle: other.vehicle.clone(),
            available: other.available,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&RideEntity> for RideDto {
    fn from(other: &RideEntity) -> RideDto {
        RideDto {
            ride_id: other.ride_id.to_string(),
            version: other.version,
            passenger_id: other.passenger_id.to_string(),
            driver_id: other.driver_id.to_string(),
            pickup: other.pickup.to_string(),
            dropoff: other.dropoff.to_string(),
            status: other.status,
            pricing: other.pricing,
            fare: other.fare,
            ratings: other.ratings.clone(),
            requested_at: other.requested_at,
            completed_at: other.completed_at,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
