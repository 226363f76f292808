use std::collections::HashMap;
use std::sync::RwLock;
use async_trait::async_trait;
use chrono::Utc;
use crate::core::lending::{LendingError, LendingResult, PaginatedResult};
use crate::core::repository::{matches_predicate, paginate, Repository};
use crate::grading::domain::model::EnrollmentEntity;
use crate::grading::repository::EnrollmentRepository;

pub struct MemEnrollmentRepository {
    enrollments: RwLock<HashMap<String, EnrollmentEntity>>,
}

impl MemEnrollmentRepository {
    pub fn new() -> Self {
        Self {
            enrollments: RwLock::new(HashMap::new()),
        }
    }

    fn sorted(mut records: Vec<EnrollmentEntity>) -> Vec<EnrollmentEntity> {
        records.sort_by(|a, b| (a.created_at, a.enrollment_id.as_str())
            .cmp(&(b.created_at, b.enrollment_id.as_str())));
        records
    }
}

impl Default for MemEnrollmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<EnrollmentEntity> for MemEnrollmentRepository {
    async fn create(&self, entity: &EnrollmentEntity) -> LendingResult<usize> {
        let mut enrollments = self.enrollments.write().map_err(|_|
            LendingError::runtime("enrollment store lock poisoned", None))?;
        if enrollments.contains_key(entity.enrollment_id.as_str()) {
            return Err(LendingError::duplicate_key(
                format!("enrollment with id {} already exists", entity.enrollment_id).as_str()));
        }
        enrollments.insert(entity.enrollment_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &EnrollmentEntity) -> LendingResult<usize> {
        let mut enrollments = self.enrollments.write().map_err(|_|
            LendingError::runtime("enrollment store lock poisoned", None))?;
        let existing = enrollments.get(entity.enrollment_id.as_str()).ok_or_else(||
            LendingError::not_found(
                format!("enrollment with id {} not found", entity.enrollment_id).as_str()))?;
        if existing.version != entity.version {
            return Err(LendingError::unavailable(
                format!("enrollment {} version {} is stale",
                        entity.enrollment_id, entity.version).as_str(),
                None, true));
        }
        let mut next = entity.clone();
        next.version += 1;
        next.updated_at = Utc::now().naive_utc();
        enrollments.insert(next.enrollment_id.to_string(), next);
        Ok(1)
    }

    async fn get(&self, id: &str) -> LendingResult<EnrollmentEntity> {
        let enrollments = self.enrollments.read().map_err(|_|
            LendingError::runtime("enrollment store lock poisoned", None))?;
        enrollments.get(id).cloned().ok_or_else(||
            LendingError::not_found(format!("enrollment with id {} not found", id).as_str()))
    }

    async fn delete(&self, id: &str) -> LendingResult<usize> {
        let mut enrollments = self.enrollments.write().map_err(|_|
            LendingError::runtime("enrollment store lock poisoned", None))?;
        enrollments.remove(id).map(|_| 1).ok_or_else(||
            LendingError::not_found(format!("enrollment with id {} not found", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LendingResult<PaginatedResult<EnrollmentEntity>> {
        let enrollments = self.enrollments.read().map_err(|_|
            LendingError::runtime("enrollment store lock poisoned", None))?;
        let mut matched = Vec::new();
        for entity in enrollments.values() {
            let record = serde_json::to_value(entity)?;
            if matches_predicate(&record, predicate) {
                matched.push(entity.clone());
            }
        }
        Ok(paginate(Self::sorted(matched), page, page_size))
    }
}

#[async_trait]
impl EnrollmentRepository for MemEnrollmentRepository {
    async fn find_by_course_and_student(&self, course_id: &str,
                                        student_id: &str) -> LendingResult<Option<EnrollmentEntity>> {
        let enrollments = self.enrollments.read().map_err(|_|
            LendingError::runtime("enrollment store lock poisoned", None))?;
        Ok(enrollments.values().find(|e| e.course_id == course_id
            && e.student_id == student_id).cloned())
    }

    async fn find_by_course(&self, course_id: &str) -> LendingResult<Vec<EnrollmentEntity>> {
        let enrollments = self.enrollments.read().map_err(|_|
            LendingError::runtime("enrollment store lock poisoned", None))?;
        Ok(Self::sorted(enrollments.values()
            .filter(|e| e.course_id == course_id).cloned().collect()))
    }
}
