use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::lending::LoanStatus;
use crate::utils::date::serializer;

// LoanEntity abstracts one occupancy window of a resource by a member. The
// fine is assessed once, when the loan closes, and kept with the record.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanEntity {
    pub loan_id: String,
    pub version: i64,
    pub branch_id: String,
    pub resource_id: String,
    pub member_id: String,
    pub status: LoanStatus,
    #[serde(with = "serializer")]
    pub checked_out_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    pub returned_at: Option<NaiveDateTime>,
    pub fine_assessed: Option<f64>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl LoanEntity {
    pub fn new(branch_id: &str, resource_id: &str, member_id: &str,
               now: NaiveDateTime, loan_days: i64) -> Self {
        Self {
            loan_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            resource_id: resource_id.to_string(),
            member_id: member_id.to_string(),
            status: LoanStatus::CheckedOut,
            checked_out_at: now,
            due_at: now + Duration::days(loan_days),
            returned_at: None,
            fine_assessed: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for LoanEntity {
    fn id(&self) -> String {
        self.loan_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::core::lending::LoanStatus;
    use crate::loans::domain::model::LoanEntity;

    #[tokio::test]
    async fn test_should_build_loan_with_due_date() {
        let now = Utc::now().naive_utc();
        let loan = LoanEntity::new("branch", "resource1", "member1", now, 14);
        assert_eq!("resource1", loan.resource_id.as_str());
        assert_eq!("member1", loan.member_id.as_str());
        assert_eq!(LoanStatus::CheckedOut, loan.status);
        assert_eq!(now + Duration::days(14), loan.due_at);
        assert!(loan.returned_at.is_none());
        assert!(loan.fine_assessed.is_none());
    }
}
