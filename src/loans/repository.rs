pub mod mem_loan_repository;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::core::lending::{LendingResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::loans::domain::model::LoanEntity;

#[async_trait]
pub trait LoanRepository: Repository<LoanEntity> {
    // the open loan for a member/resource pair, if any
    async fn find_active(&self, member_id: &str, resource_id: &str) -> LendingResult<Option<LoanEntity>>;

    async fn count_active(&self, member_id: &str) -> LendingResult<usize>;

    // open loans whose due time has passed
    async fn query_overdue(&self, now: NaiveDateTime, page: Option<&str>,
                           page_size: usize) -> LendingResult<PaginatedResult<LoanEntity>>;
}
