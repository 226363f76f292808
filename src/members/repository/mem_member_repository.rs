use std::collections::HashMap;
use std::sync::RwLock;
use async_trait::async_trait;
use chrono::Utc;
use crate::core::lending::{LendingError, LendingResult, PaginatedResult};
use crate::core::repository::{matches_predicate, paginate, Repository};
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;

pub struct MemMemberRepository {
    members: RwLock<HashMap<String, MemberEntity>>,
}

impl MemMemberRepository {
    pub fn new() -> Self {
        Self {
            members: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemMemberRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<MemberEntity> for MemMemberRepository {
    async fn create(&self, entity: &MemberEntity) -> LendingResult<usize> {
        let mut members = self.members.write().map_err(|_|
            LendingError::runtime("member store lock poisoned", None))?;
        if members.contains_key(entity.member_id.as_str()) {
            return Err(LendingError::duplicate_key(
                format!("member with id {} already exists", entity.member_id).as_str()));
        }
        members.insert(entity.member_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &MemberEntity) -> LendingResult<usize> {
        let mut members = self.members.write().map_err(|_|
            LendingError::runtime("member store lock poisoned", None))?;
        let existing = members.get(entity.member_id.as_str()).ok_or_else(||
            LendingError::not_found(
                format!("member with id {} not found", entity.member_id).as_str()))?;
        if existing.version != entity.version {
            return Err(LendingError::unavailable(
                format!("member {} version {} is stale", entity.member_id, entity.version).as_str(),
                None, true));
        }
        let mut next = entity.clone();
        next.version += 1;
        next.updated_at = Utc::now().naive_utc();
        members.insert(next.member_id.to_string(), next);
        Ok(1)
    }

    async fn get(&self, id: &str) -> LendingResult<MemberEntity> {
        let members = self.members.read().map_err(|_|
            LendingError::runtime("member store lock poisoned", None))?;
        members.get(id).cloned().ok_or_else(||
            LendingError::not_found(format!("member with id {} not found", id).as_str()))
    }

    async fn delete(&self, id: &str) -> LendingResult<usize> {
        let mut members = self.members.write().map_err(|_|
            LendingError::runtime("member store lock poisoned", None))?;
        members.remove(id).map(|_| 1).ok_or_else(||
            LendingError::not_found(format!("member with id {} not found", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LendingResult<PaginatedResult<MemberEntity>> {
        let members = self.members.read().map_err(|_|
            LendingError::runtime("member store lock poisoned", None))?;
        let mut matched = Vec::new();
        for entity in members.values() {
            let record = serde_json::to_value(entity)?;
            if matches_predicate(&record, predicate) {
                matched.push(entity.clone());
            }
        }
        matched.sort_by(|a, b| (a.created_at, a.member_id.as_str())
            .cmp(&(b.created_at, b.member_id.as_str())));
        Ok(paginate(matched, page, page_size))
    }
}

impl MemberRepository for MemMemberRepository {}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::repository::Repository;
    use crate::members::domain::model::MemberEntity;
    use crate::members::repository::mem_member_repository::MemMemberRepository;

    #[tokio::test]
    async fn test_should_create_and_query_by_email() {
        let repo = MemMemberRepository::new();
        let member = MemberEntity::new("alice@example.com");
        repo.create(&member).await.expect("should create");

        let res = repo.query(&HashMap::from([
            ("email".to_string(), "alice@example.com".to_string())]), None, 10).await.expect("should query");
        assert_eq!(1, res.records.len());
        assert_eq!(member.member_id, res.records[0].member_id);
    }

    #[tokio::test]
    async fn test_should_update_with_version_bump() {
        let repo = MemMemberRepository::new();
        let mut member = MemberEntity::new("bob@example.com");
        repo.create(&member).await.expect("should create");

        member.outstanding_fines = 3.0;
        repo.update(&member).await.expect("should update");
        let loaded = repo.get(member.member_id.as_str()).await.expect("should get");
        assert_eq!(1, loaded.version);
        assert_eq!(3.0, loaded.outstanding_fines);
    }
}
