use async_trait::async_trait;
use core::option::Option;
use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::core::lending::{LendingResult, PaginatedResult};
use crate::gateway::NotifyVia;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LendingResult<usize>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> LendingResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> LendingResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> LendingResult<usize>;

    // find by field predicates
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LendingResult<PaginatedResult<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    Memory,
}

impl RepositoryStore {
    pub fn notify_via(&self) -> NotifyVia {
        match self {
            RepositoryStore::Memory => { NotifyVia::Log }
        }
    }
}

// Matches a serialized record against string predicates, where each predicate
// key names a top-level field. Status enums serialize as bare strings so they
// compare directly.
pub(crate) fn matches_predicate(record: &serde_json::Value,
                                predicate: &HashMap<String, String>) -> bool {
    for (field, expected) in predicate {
        let matched = match record.get(field.as_str()) {
            Some(serde_json::Value::String(actual)) => { actual == expected }
            Some(other) => { other.to_string() == *expected }
            None => { false }
        };
        if !matched {
            return false;
        }
    }
    true
}

// Offset-token pagination over records already sorted by the caller.
pub(crate) fn paginate<T>(records: Vec<T>, page: Option<&str>,
                          page_size: usize) -> PaginatedResult<T> {
    let offset = page.and_then(|p| p.parse::<usize>().ok()).unwrap_or(0);
    let total = records.len();
    let records: Vec<T> = records.into_iter().skip(offset).take(page_size).collect();
    let next_page = if offset + records.len() < total {
        Some((offset + page_size).to_string())
    } else {
        None
    };
    PaginatedResult::new(page, page_size, next_page, records)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use serde_json::json;
    use crate::core::repository::{matches_predicate, paginate};

    #[tokio::test]
    async fn test_should_match_string_fields() {
        let record = json!({"member_id": "m1", "status": "CheckedOut"});
        assert!(matches_predicate(&record, &HashMap::from([
            ("member_id".to_string(), "m1".to_string())])));
        assert!(matches_predicate(&record, &HashMap::from([
            ("status".to_string(), "CheckedOut".to_string())])));
        assert!(!matches_predicate(&record, &HashMap::from([
            ("status".to_string(), "Returned".to_string())])));
        assert!(!matches_predicate(&record, &HashMap::from([
            ("missing".to_string(), "x".to_string())])));
    }

    #[tokio::test]
    async fn test_should_paginate_with_offset_tokens() {
        let res = paginate(vec![1, 2, 3, 4, 5], None, 2);
        assert_eq!(vec![1, 2], res.records);
        assert_eq!(Some("2".to_string()), res.next_page);

        let res = paginate(vec![1, 2, 3, 4, 5], Some("4"), 2);
        assert_eq!(vec![5], res.records);
        assert_eq!(None, res.next_page);
    }
}
