pub mod model;
pub mod service;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::catalog::domain::model::LoanPolicy;
use crate::core::lending::{LendingResult, PaginatedResult};
use crate::loans::dto::LoanDto;

const UNIT_SECS: i64 = 24 * 60 * 60;

// Billable overdue days: zero at or before the due time, otherwise the
// elapsed overdue interval rounded up to whole days. One hour into the sixth
// overdue day bills six units.
pub fn overdue_units(due_at: NaiveDateTime, returned_at: NaiveDateTime) -> i64 {
    let overdue_secs = (returned_at - due_at).num_seconds();
    if overdue_secs <= 0 {
        return 0;
    }
    (overdue_secs + UNIT_SECS - 1) / UNIT_SECS
}

// The fine never goes negative: an early return is simply free, not a credit
// against later fines.
pub fn assess_fine(due_at: NaiveDateTime, returned_at: NaiveDateTime,
                   policy: &LoanPolicy) -> f64 {
    overdue_units(due_at, returned_at) as f64 * policy.fine_per_day
}

#[derive(Debug, PartialEq, Clone)]
pub enum CheckoutOutcome {
    Loaned(LoanDto),
    // the resource is already claimed by someone
    Unavailable,
    // digital resources are not checked out
    NotLoanable,
    // the member hit the concurrent loan limit
    LimitReached,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ReturnOutcome {
    Returned {
        loan: LoanDto,
        fine: f64,
    },
    NotOnLoan,
}

#[async_trait]
pub trait LoanService: Sync + Send {
    async fn checkout(&self, member_id: &str, resource_id: &str,
                      now: NaiveDateTime) -> LendingResult<CheckoutOutcome>;
    async fn returned(&self, member_id: &str, resource_id: &str,
                      now: NaiveDateTime) -> LendingResult<ReturnOutcome>;
    async fn query_overdue(&self, now: NaiveDateTime, page: Option<&str>,
                           page_size: usize) -> LendingResult<PaginatedResult<LoanDto>>;
    async fn history(&self, member_id: &str) -> LendingResult<Vec<LoanDto>>;
}
