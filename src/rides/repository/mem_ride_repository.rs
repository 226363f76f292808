use std::collections::HashMap;
use std::sync::RwLock;
use async_trait::async_trait;
use chrono::Utc;
use crate::core::lending::{LendingError, LendingResult, PaginatedResult};
use crate::core::repository::{matches_predicate, paginate, Repository};
use crate::rides::domain::model::RideEntity;
use crate::rides::repository::RideRepository;

pub struct MemRideRepository {
    rides: RwLock<HashMap<String, RideEntity>>,
}

impl MemRideRepository {
    pub fn new() -> Self {
        Self {
            rides: RwLock::new(HashMap::new()),
        }
    }

    fn sorted(mut records: Vec<RideEntity>) -> Vec<RideEntity> {
        records.sort_by(|a, b| (a.requested_at, a.ride_id.as_str())
            .cmp(&(b.requested_at, b.ride_id.as_str())));
        records
    }
}

impl Default for MemRideRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<RideEntity> for MemRideRepository {
    async fn create(&self, entity: &RideEntity) -> LendingResult<usize> {
        let mut rides = self.rides.write().map_err(|_|
            LendingError::runtime("ride store lock poisoned", None))?;
        if rides.contains_key(entity.ride_id.as_str()) {
            return Err(LendingError::duplicate_key(
                format!("ride with id {} already exists", entity.ride_id).as_str()));
        }
        rides.insert(entity.ride_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &RideEntity) -> LendingResult<usize> {
        let mut rides = self.rides.write().map_err(|_|
            LendingError::runtime("ride store lock poisoned", None))?;
        let existing = rides.get(entity.ride_id.as_str()).ok_or_else(||
            LendingError::not_found(
                format!("ride with id {} not found", entity.ride_id).as_str()))?;
        if existing.version != entity.version {
            return Err(LendingError::unavailable(
                format!("ride {} version {} is stale", entity.ride_id, entity.version).as_str(),
                None, true));
        }
        let mut next = entity.clone();
        next.version += 1;
        next.updated_at = Utc::now().naive_utc();
        rides.insert(next.ride_id.to_string(), next);
        Ok(1)
    }

    async fn get(&self, id: &str) -> LendingResult<RideEntity> {
        let rides = self.rides.read().map_err(|_|
            LendingError::runtime("ride store lock poisoned", None))?;
        rides.get(id).cloned().ok_or_else(||
            LendingError::not_found(format!("ride with id {} not found", id).as_str()))
    }

    async fn delete(&self, id: &str) -> LendingResult<usize> {
        let mut rides = self.rides.write().map_err(|_|
            LendingError::runtime("ride store lock poisoned", None))?;
        rides.remove(id).map(|_| 1).ok_or_else(||
            LendingError::not_found(format!("ride with id {} not found", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LendingResult<PaginatedResult<RideEntity>> {
        let rides = self.rides.read().map_err(|_|
            LendingError::runtime("ride store lock poisoned", None))?;
        let mut matched = Vec::new();
        for entity in rides.values() {
            let record = serde_json::to_value(entity)?;
            if matches_predicate(&record, predicate) {
                matched.push(entity.clone());
            }
        }
        Ok(paginate(Self::sorted(matched), page, page_size))
    }
}

#[async_trait]
impl RideRepository for MemRideRepository {
    async fn find_by_participant(&self, participant_id: &str) -> LendingResult<Vec<RideEntity>> {
        let rides = self.rides.read().map_err(|_|
            LendingError::runtime("ride store lock poisoned", None))?;
        let matched = rides.values()
            .filter(|r| r.passenger_id == participant_id || r.driver_id == participant_id)
            .cloned().collect();
        Ok(Self::sorted(matched))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crate::core::repository::Repository;
    use crate::pricing::Pricing;
    use crate::rides::domain::model::RideEntity;
    use crate::rides::repository::mem_ride_repository::MemRideRepository;
    use crate::rides::repository::RideRepository;

    #[tokio::test]
    async fn test_should_find_rides_by_participant() {
        let repo = MemRideRepository::new();
        let now = Utc::now().naive_utc();
        repo.create(&RideEntity::new("p1", "d1", "A", "B", Pricing::Standard, now))
            .await.expect("should create");
        repo.create(&RideEntity::new("p2", "d1", "C", "D", Pricing::Standard, now))
            .await.expect("should create");

        assert_eq!(1, repo.find_by_participant("p1").await.expect("should find").len());
        assert_eq!(2, repo.find_by_participant("d1").await.expect("should find").len());
        assert!(repo.find_by_participant("p3").await.expect("should find").is_empty());
    }
}
