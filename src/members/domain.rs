pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::lending::LendingResult;
use crate::members::dto::MemberDto;

// Fine payments clamp to the outstanding balance; non-positive offers are
// refused without touching it.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PaymentOutcome {
    Applied {
        paid: f64,
        outstanding: f64,
    },
    NonPositiveAmount,
}

#[async_trait]
pub trait MemberService: Sync + Send {
    async fn register_member(&self, member: &MemberDto) -> LendingResult<MemberDto>;
    async fn update_member(&self, member: &MemberDto) -> LendingResult<MemberDto>;
    async fn remove_member(&self, id: &str) -> LendingResult<()>;
    async fn find_member_by_id(&self, id: &str) -> LendingResult<MemberDto>;
    async fn find_members_by_email(&self, email: &str) -> LendingResult<Vec<MemberDto>>;
    // accrues a positive fine on the member's running balance
    async fn add_fine(&self, id: &str, amount: f64) -> LendingResult<f64>;
    async fn pay_fine(&self, id: &str, amount: f64) -> LendingResult<PaymentOutcome>;
}
