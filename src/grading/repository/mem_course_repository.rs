use std::collections::HashMap;
use std::sync::RwLock;
use async_trait::async_trait;
use chrono::Utc;
use crate::core::lending::{LendingError, LendingResult, PaginatedResult};
use crate::core::repository::{matches_predicate, paginate, Repository};
use crate::grading::domain::model::CourseEntity;
use crate::grading::repository::CourseRepository;

pub struct MemCourseRepository {
    courses: RwLock<HashMap<String, CourseEntity>>,
}

impl MemCourseRepository {
    pub fn new() -> Self {
        Self {
            courses: RwLock::new(HashMap::new()),
        }
    }

    fn sorted(mut records: Vec<CourseEntity>) -> Vec<CourseEntity> {
        records.sort_by(|a, b| (a.created_at, a.course_id.as_str())
            .cmp(&(b.created_at, b.course_id.as_str())));
        records
    }
}

impl Default for MemCourseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<CourseEntity> for MemCourseRepository {
    async fn create(&self, entity: &CourseEntity) -> LendingResult<usize> {
        let mut courses = self.courses.write().map_err(|_|
            LendingError::runtime("course store lock poisoned", None))?;
        if courses.contains_key(entity.course_id.as_str()) {
            return Err(LendingError::duplicate_key(
                format!("course with id {} already exists", entity.course_id).as_str()));
        }
        courses.insert(entity.course_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &CourseEntity) -> LendingResult<usize> {
        let mut courses = self.courses.write().map_err(|_|
            LendingError::runtime("course store lock poisoned", None))?;
        let existing = courses.get(entity.course_id.as_str()).ok_or_else(||
            LendingError::not_found(
                format!("course with id {} not found", entity.course_id).as_str()))?;
        if existing.version != entity.version {
            return Err(LendingError::unavailable(
                format!("course {} version {} is stale", entity.course_id, entity.version).as_str(),
                None, true));
        }
        let mut next = entity.clone();
        next.version += 1;
        next.updated_at = Utc::now().naive_utc();
        courses.insert(next.course_id.to_string(), next);
        Ok(1)
    }

    async fn get(&self, id: &str) -> LendingResult<CourseEntity> {
        let courses = self.courses.read().map_err(|_|
            LendingError::runtime("course store lock poisoned", None))?;
        courses.get(id).cloned().ok_or_else(||
            LendingError::not_found(format!("course with id {} not found", id).as_str()))
    }

    async fn delete(&self, id: &str) -> LendingResult<usize> {
        let mut courses = self.courses.write().map_err(|_|
            LendingError::runtime("course store lock poisoned", None))?;
        courses.remove(id).map(|_| 1).ok_or_else(||
            LendingError::not_found(format!("course with id {} not found", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LendingResult<PaginatedResult<CourseEntity>> {
        let courses = self.courses.read().map_err(|_|
            LendingError::runtime("course store lock poisoned", None))?;
        let mut matched = Vec::new();
        for entity in courses.values() {
            let record = serde_json::to_value(entity)?;
            if matches_predicate(&record, predicate) {
                matched.push(entity.clone());
            }
        }
        Ok(paginate(Self::sorted(matched), page, page_size))
    }
}

impl CourseRepository for MemCourseRepository {
}
