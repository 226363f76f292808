use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::domain::Configuration;
use crate::core::lending::{LendingError, LendingResult};
use crate::gateway::notifier::Notifier;
use crate::members::domain::{MemberService, PaymentOutcome};
use crate::members::domain::model::MemberEntity;
use crate::members::dto::MemberDto;
use crate::members::repository::MemberRepository;

pub struct MemberServiceImpl {
    member_repository: Box<dyn MemberRepository>,
    notifier: Box<dyn Notifier>,
}

impl MemberServiceImpl {
    pub fn new(_config: &Configuration, member_repository: Box<dyn MemberRepository>,
               notifier: Box<dyn Notifier>) -> Self {
        Self {
            member_repository,
            notifier,
        }
    }
}

#[async_trait]
impl MemberService for MemberServiceImpl {
    async fn register_member(&self, member: &MemberDto) -> LendingResult<MemberDto> {
        self.member_repository.create(&MemberEntity::from(member)).await?;
        let _ = self.notifier.notify(member.member_id.as_str(), "Account Creation",
                                     "your membership account has been created").await?;
        Ok(member.clone())
    }

    async fn update_member(&self, member: &MemberDto) -> LendingResult<MemberDto> {
        self.member_repository.update(&MemberEntity::from(member)).await?;
        Ok(member.clone())
    }

    async fn remove_member(&self, id: &str) -> LendingResult<()> {
        self.member_repository.delete(id).await.map(|_| ())
    }

    async fn find_member_by_id(&self, id: &str) -> LendingResult<MemberDto> {
        self.member_repository.get(id).await.map(|m| MemberDto::from(&m))
    }

    async fn find_members_by_email(&self, email: &str) -> LendingResult<Vec<MemberDto>> {
        let res = self.member_repository.query(
            &HashMap::from([("email".to_string(), email.to_string())]), None, 100).await?;
        Ok(res.records.iter().map(MemberDto::from).collect())
    }

    async fn add_fine(&self, id: &str, amount: f64) -> LendingResult<f64> {
        if amount <= 0.0 {
            return Err(LendingError::validation(
                format!("fine amount {} must be positive", amount).as_str(), None));
        }
        let mut member = self.member_repository.get(id).await?;
        member.outstanding_fines += amount;
        self.member_repository.update(&member).await?;
        let _ = self.notifier.notify(id, "Fine Assessed",
                                     format!("a fine of ${:.2} was added, total due ${:.2}",
                                             amount, member.outstanding_fines).as_str()).await?;
        Ok(member.outstanding_fines)
    }

    async fn pay_fine(&self, id: &str, amount: f64) -> LendingResult<PaymentOutcome> {
        if amount <= 0.0 {
            tracing::warn!(member_id = id, amount, "payment amount must be positive");
            return Ok(PaymentOutcome::NonPositiveAmount);
        }
        let mut member = self.member_repository.get(id).await?;
        let paid = amount.min(member.outstanding_fines);
        member.outstanding_fines -= paid;
        self.member_repository.update(&member).await?;
        let _ = self.notifier.notify(id, "Payment Received",
                                     format!("paid ${:.2}, remaining fines ${:.2}",
                                             paid, member.outstanding_fines).as_str()).await?;
        Ok(PaymentOutcome::Applied { paid, outstanding: member.outstanding_fines })
    }
}

impl From<&MemberEntity> for MemberDto {
    fn from(other: &MemberEntity) -> Self {
        Self {
            member_id: other.member_id.to_string(),
            version: other.version,
            first_name: other.first_name.to_string(),
            last_name: other.last_name.to_string(),
            email: other.email.to_string(),
            roles: other.roles.clone(),
            outstanding_fines: other.outstanding_fines,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&MemberDto> for MemberEntity {
    fn from(other: &MemberDto) -> Self {
        Self {
            member_id: other.member_id.to_string(),
            version: other.version,
            first_name: other.first_name.to_string(),
            last_name: other.last_name.to_string(),
            email: other.email.to_string(),
            roles: other.roles.clone(),
            outstanding_fines: other.outstanding_fines,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
