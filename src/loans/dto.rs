use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::lending::LoanStatus;
use crate::utils::date::serializer;

// LoanDto abstracts a loan record for callers of the service layer.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanDto {
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

impl Identifiable for LoanDto {
    fn id(&self) -> String {
        self.loan_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
