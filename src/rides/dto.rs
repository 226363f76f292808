use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::lending::RideStatus;
use crate::pricing::Pricing;
use crate::rides::domain::model::VehicleInfo;
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DriverDto {
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

impl DriverDto {
    pub fn new(name: &str, email: &str, vehicle: VehicleInfo) -> Self {
        Self {
            driver_id: Uuid::new_v4().to_string(),
            version: 0,
            name: name.to_string(),
            email: email.to_string(),
            vehicle,
            available: true,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for DriverDto {
    fn id(&self) -> String {
        self.driver_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// RideDto abstracts a ride record for callers of the service layer.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RideDto {
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

impl Identifiable for RideDto {
    fn id(&self) -> String {
        self.ride_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
