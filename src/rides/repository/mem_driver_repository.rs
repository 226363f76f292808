use std::collections::HashMap;
use std::sync::RwLock;
use async_trait::async_trait;
use chrono::Utc;
use crate::core::lending::{LendingError, LendingResult, PaginatedResult};
use crate::core::repository::{matches_predicate, paginate, Repository};
use crate::rides::domain::model::DriverEntity;
use crate::rides::repository::DriverRepository;

pub struct MemDriverRepository {
    drivers: RwLock<HashMap<String, DriverEntity>>,
}

impl MemDriverRepository {
    pub fn new() -> Self {
        Self {
            drivers: RwLock::new(HashMap::new()),
        }
    }

    fn sorted(mut records: Vec<DriverEntity>) -> Vec<DriverEntity> {
        records.sort_by(|a, b| (a.created_at, a.driver_id.as_str())
            .cmp(&(b.created_at, b.driver_id.as_str())));
        records
    }
}

impl Default for MemDriverRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<DriverEntity> for MemDriverRepository {
    async fn create(&self, entity: &DriverEntity) -> LendingResult<usize> {
        let mut drivers = self.drivers.write().map_err(|_|
            LendingError::runtime("driver store lock poisoned", None))?;
        if drivers.contains_key(entity.driver_id.as_str()) {
            return Err(LendingError::duplicate_key(
                format!("driver with id {} already exists", entity.driver_id).as_str()));
        }
        drivers.insert(entity.driver_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &DriverEntity) -> LendingResult<usize> {
        let mut drivers = self.drivers.write().map_err(|_|
            LendingError::runtime("driver store lock poisoned", None))?;
        let existing = drivers.get(entity.driver_id.as_str()).ok_or_else(||
            LendingError::not_found(
                format!("driver with id {} not found", entity.driver_id).as_str()))?;
        if existing.version != entity.version {
            return Err(LendingError::unavailable(
                format!("driver {} version {} is stale", entity.driver_id, entity.version).as_str(),
                None, true));
        }
        let mut next = entity.clone();
        next.version += 1;
        next.updated_at = Utc::now().naive_utc();
        drivers.insert(next.driver_id.to_string(), next);
        Ok(1)
    }

    async fn get(&self, id: &str) -> LendingResult<DriverEntity> {
        let drivers = self.drivers.read().map_err(|_|
            LendingError::runtime("driver store lock poisoned", None))?;
        drivers.get(id).cloned().ok_or_else(||
            LendingError::not_found(format!("driver with id {} not found", id).as_str()))
    }

    async fn delete(&self, id: &str) -> LendingResult<usize> {
        let mut drivers = self.drivers.write().map_err(|_|
            LendingError::runtime("driver store lock poisoned", None))?;
        drivers.remove(id).map(|_| 1).ok_or_else(||
            LendingError::not_found(format!("driver with id {} not found", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LendingResult<PaginatedResult<DriverEntity>> {
        let drivers = self.drivers.read().map_err(|_|
            LendingError::runtime("driver store lock poisoned", None))?;
        let mut matched = Vec::new();
        for entity in drivers.values() {
            let record = serde_json::to_value(entity)?;
            if matches_predicate(&record, predicate) {
                matched.push(entity.clone());
            }
        }
        Ok(paginate(Self::sorted(matched), page, page_size))
    }
}

#[async_trait]
impl DriverRepository for MemDriverRepository {
    async fn claim_first_available(&self) -> LendingResult<Option<DriverEntity>> {
        // claim under the write lock so two requests cannot pick the same driver
        let mut drivers = self.drivers.write().map_err(|_|
            LendingError::runtime("driver store lock poisoned", None))?;
        let candidates = Self::sorted(drivers.values().cloned().collect());
        for candidate in candidates {
            if candidate.available {
                let claimed = drivers.get_mut(candidate.driver_id.as_str()).ok_or_else(||
                    LendingError::runtime("claimed driver vanished", None))?;
                claimed.available = false;
                claimed.version += 1;
                claimed.updated_at = Utc::now().naive_utc();
                return Ok(Some(claimed.clone()));
            }
        }
        Ok(None)
    }

    async fn release(&self, driver_id: &str) -> LendingResult<bool> {
        let mut drivers = self.drivers.write().map_err(|_|
            LendingError::runtime("driver store lock poisoned", None))?;
        let driver = drivers.get_mut(driver_id).ok_or_else(||
            LendingError::not_found(format!("driver with id {} not found", driver_id).as_str()))?;
        if driver.available {
            return Ok(false);
        }
        driver.available = true;
        driver.version += 1;
        driver.updated_at = Utc::now().naive_utc();
        Ok(true)
    }
}
