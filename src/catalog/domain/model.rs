use chrono::{NaiveDateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::lending::ResourceStatus;
use crate::utils::date::serializer;

// LoanPolicy carries the per-kind lending constants: how long a loan runs
// and what one overdue day costs.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct LoanPolicy {
    pub loan_days: i64,
    pub fine_per_day: f64,
}

// ResourceKind folds the item hierarchy (book/dvd/ebook) into one tagged
// union; kind-specific fields live on the variant, shared fields on the
// entity.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum ResourceKind {
    Book {
        author: String,
        isbn: String,
        page_count: i64,
    },
    Dvd {
        director: String,
        runtime_minutes: i64,
    },
    Ebook {
        author: String,
        format: String,
        file_size_mb: f64,
    },
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Book { .. } => "Book",
            ResourceKind::Dvd { .. } => "DVD",
            ResourceKind::Ebook { .. } => "EBook",
        }
    }

    // Digital resources are always available and carry no policy.
    pub fn loan_policy(&self) -> Option<LoanPolicy> {
        match self {
            ResourceKind::Book { .. } => Some(LoanPolicy { loan_days: 14, fine_per_day: 0.5 }),
            ResourceKind::Dvd { .. } => Some(LoanPolicy { loan_days: 7, fine_per_day: 1.0 }),
            ResourceKind::Ebook { .. } => None,
        }
    }

    pub fn is_loanable(&self) -> bool {
        self.loan_policy().is_some()
    }
}

// ResourceEntity abstracts one circulating copy in the catalog.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ResourceEntity {
    pub resource_id: String,
    pub version: i64,
    pub shelf_code: String,
    pub title: String,
    pub subject: String,
    pub kind: ResourceKind,
    pub status: ResourceStatus,
    #[serde(with = "serializer")]
    pub published_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl ResourceEntity {
    pub fn new(title: &str, subject: &str, kind: ResourceKind) -> Self {
        Self {
            resource_id: Uuid::new_v4().to_string(),
            version: 0,
            shelf_code: format!("{}", rand::thread_rng().gen_range(0..1000)),
            title: title.to_string(),
            subject: subject.to_string(),
            kind,
            status: ResourceStatus::Available,
            published_at: Utc::now().naive_utc(), // for testing purpose
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for ResourceEntity {
    fn id(&self) -> String {
        self.resource_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
