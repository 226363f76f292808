use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::lending::Role;
use crate::utils::date::serializer;

// MemberEntity abstracts a registered borrower. Holdings and history are not
// stored here; they are derived from the loans module so the resource-side
// status flag stays the single source of truth.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MemberEntity {
    pub member_id: String,
    pub version: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub outstanding_fines: f64,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MemberEntity {
    pub fn new(email: &str) -> Self {
        Self {
            member_id: Uuid::new_v4().to_string(),
            version: 0,
            first_name: "".to_string(),
            last_name: "".to_string(),
            email: email.to_string(),
            roles: vec![],
            outstanding_fines: 0.0,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for MemberEntity {
    fn id(&self) -> String {
        self.member_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::members::domain::model::MemberEntity;

    #[tokio::test]
    async fn test_should_build_member() {
        let member = MemberEntity::new("alice@example.com");
        assert_eq!("alice@example.com", member.email.as_str());
        assert_eq!(0.0, member.outstanding_fines);
        assert!(member.roles.is_empty());
    }
}
