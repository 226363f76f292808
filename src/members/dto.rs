use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::lending::Role;
use crate::utils::date::serializer;

// MemberDto abstracts a borrower account for callers of the service layer.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MemberDto {
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

impl MemberDto {
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

    pub fn is_role(&self, match_role: Role) -> bool {
        for role in self.roles.iter() {
            if *role == match_role {
                return true;
            }
        }
        false
    }

    pub fn is_librarian(&self) -> bool {
        self.is_role(Role::Librarian)
    }

    pub fn is_regular(&self) -> bool {
        self.roles.is_empty() || self.is_role(Role::Regular)
    }
}

impl Identifiable for MemberDto {
    fn id(&self) -> String {
        self.member_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
