use std::collections::HashMap;
use std::sync::RwLock;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use crate::core::lending::{LendingError, LendingResult, LoanStatus, PaginatedResult};
use crate::core::repository::{matches_predicate, paginate, Repository};
use crate::loans::domain::model::LoanEntity;
use crate::loans::repository::LoanRepository;

pub struct MemLoanRepository {
    loans: RwLock<HashMap<String, LoanEntity>>,
}

impl MemLoanRepository {
    pub fn new() -> Self {
        Self {
            loans: RwLock::new(HashMap::new()),
        }
    }

    fn sorted(mut records: Vec<LoanEntity>) -> Vec<LoanEntity> {
        records.sort_by(|a, b| (a.checked_out_at, a.loan_id.as_str())
            .cmp(&(b.checked_out_at, b.loan_id.as_str())));
        records
    }
}

impl Default for MemLoanRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<LoanEntity> for MemLoanRepository {
    async fn create(&self, entity: &LoanEntity) -> LendingResult<usize> {
        let mut loans = self.loans.write().map_err(|_|
            LendingError::runtime("loan store lock poisoned", None))?;
        if loans.contains_key(entity.loan_id.as_str()) {
            return Err(LendingError::duplicate_key(
                format!("loan with id {} already exists", entity.loan_id).as_str()));
        }
        loans.insert(entity.loan_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &LoanEntity) -> LendingResult<usize> {
        let mut loans = self.loans.write().map_err(|_|
            LendingError::runtime("loan store lock poisoned", None))?;
        let existing = loans.get(entity.loan_id.as_str()).ok_or_else(||
            LendingError::not_found(
                format!("loan with id {} not found", entity.loan_id).as_str()))?;
        if existing.version != entity.version {
            return Err(LendingError::unavailable(
                format!("loan {} version {} is stale", entity.loan_id, entity.version).as_str(),
                None, true));
        }
        let mut next = entity.clone();
        next.version += 1;
        next.updated_at = Utc::now().naive_utc();
        loans.insert(next.loan_id.to_string(), next);
        Ok(1)
    }

    async fn get(&self, id: &str) -> LendingResult<LoanEntity> {
        let loans = self.loans.read().map_err(|_|
            LendingError::runtime("loan store lock poisoned", None))?;
        loans.get(id).cloned().ok_or_else(||
            LendingError::not_found(format!("loan with id {} not found", id).as_str()))
    }

    async fn delete(&self, id: &str) -> LendingResult<usize> {
        let mut loans = self.loans.write().map_err(|_|
            LendingError::runtime("loan store lock poisoned", None))?;
        loans.remove(id).map(|_| 1).ok_or_else(||
            LendingError::not_found(format!("loan with id {} not found", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LendingResult<PaginatedResult<LoanEntity>> {
        let loans = self.loans.read().map_err(|_|
            LendingError::runtime("loan store lock poisoned", None))?;
        let mut matched = Vec::new();
        for entity in loans.values() {
            let record = serde_json::to_value(entity)?;
            if matches_predicate(&record, predicate) {
                matched.push(entity.clone());
            }
        }
        Ok(paginate(Self::sorted(matched), page, page_size))
    }
}

#[async_trait]
impl LoanRepository for MemLoanRepository {
    async fn find_active(&self, member_id: &str, resource_id: &str) -> LendingResult<Option<LoanEntity>> {
        let loans = self.loans.read().map_err(|_|
            LendingError::runtime("loan store lock poisoned", None))?;
        Ok(loans.values().find(|l| l.member_id == member_id
            && l.resource_id == resource_id
            && l.status == LoanStatus::CheckedOut).cloned())
    }

    async fn count_active(&self, member_id: &str) -> LendingResult<usize> {
        let loans = self.loans.read().map_err(|_|
            LendingError::runtime("loan store lock poisoned", None))?;
        Ok(loans.values().filter(|l| l.member_id == member_id
            && l.status == LoanStatus::CheckedOut).count())
    }

    async fn query_overdue(&self, now: NaiveDateTime, page: Option<&str>,
                           page_size: usize) -> LendingResult<PaginatedResult<LoanEntity>> {
        let loans = self.loans.read().map_err(|_|
            LendingError::runtime("loan store lock poisoned", None))?;
        let matched: Vec<LoanEntity> = loans.values()
            .filter(|l| l.status == LoanStatus::CheckedOut && l.due_at < now)
            .cloned().collect();
        Ok(paginate(Self::sorted(matched), page, page_size))
    }
}
