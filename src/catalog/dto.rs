use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::catalog::domain::model::{LoanPolicy, ResourceKind};
use crate::core::domain::Identifiable;
use crate::core::lending::ResourceStatus;
use crate::utils::date::serializer;

// ResourceDto abstracts a catalog resource for callers of the service layer.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ResourceDto {
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

impl ResourceDto {
    pub fn new(title: &str, subject: &str, kind: ResourceKind) -> Self {
        Self {
            resource_id: Uuid::new_v4().to_string(),
            version: 0,
            shelf_code: "".to_string(),
            title: title.to_string(),
            subject: subject.to_string(),
            kind,
            status: ResourceStatus::Available,
            published_at: Utc::now().naive_utc(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn loan_policy(&self) -> Option<LoanPolicy> {
        self.kind.loan_policy()
    }
}

impl Identifiable for ResourceDto {
    fn id(&self) -> String {
        self.resource_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::dto::ResourceDto;
    use crate::catalog::domain::model::ResourceKind;
    use crate::core::lending::ResourceStatus;

    #[tokio::test]
    async fn test_should_build_resource_dto() {
        let resource = ResourceDto::new("Inception", "Sci-Fi", ResourceKind::Dvd {
            director: "Christopher Nolan".to_string(),
            runtime_minutes: 148,
        });
        assert_eq!("Inception", resource.title.as_str());
        assert_eq!(ResourceStatus::Available, resource.status);
        assert_eq!(1.0, resource.loan_policy().expect("dvd policy").fine_per_day);
    }
}
