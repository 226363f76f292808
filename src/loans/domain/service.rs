use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::lending::{LendingResult, LoanStatus, PaginatedResult};
use crate::gateway::notifier::Notifier;
use crate::loans::domain::{assess_fine, CheckoutOutcome, LoanService, ReturnOutcome};
use crate::loans::domain::model::LoanEntity;
use crate::loans::dto::LoanDto;
use crate::loans::repository::LoanRepository;
use crate::members::domain::MemberService;

pub struct LoanServiceImpl {
    branch_id: String,
    max_loans: i64,
    loan_repository: Box<dyn LoanRepository>,
    member_service: Arc<dyn MemberService>,
    catalog_service: Arc<dyn CatalogService>,
    notifier: Box<dyn Notifier>,
}

impl LoanServiceImpl {
    pub fn new(config: &Configuration, loan_repository: Box<dyn LoanRepository>,
               member_service: Arc<dyn MemberService>, catalog_service: Arc<dyn CatalogService>,
               notifier: Box<dyn Notifier>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            max_loans: config.max_loans,
            loan_repository,
            member_service,
            catalog_service,
            notifier,
        }
    }
}

#[async_trait]
impl LoanService for LoanServiceImpl {
    async fn checkout(&self, member_id: &str, resource_id: &str,
                      now: NaiveDateTime) -> LendingResult<CheckoutOutcome> {
        let member = self.member_service.find_member_by_id(member_id).await?;
        let resource = self.catalog_service.find_resource_by_id(resource_id).await?;

        let policy = match resource.loan_policy() {
            Some(policy) => policy,
            None => {
                tracing::warn!(resource_id, kind = resource.kind.label(),
                               "resource is not loanable");
                return Ok(CheckoutOutcome::NotLoanable);
            }
        };
        let active = self.loan_repository.count_active(member_id).await?;
        if active as i64 >= self.max_loans {
            tracing::warn!(member_id, active, limit = self.max_loans,
                           "member reached the loan limit");
            return Ok(CheckoutOutcome::LimitReached);
        }
        // unpaid fines do not block borrowing; occupancy and payment are
        // decoupled on purpose
        if !self.catalog_service.claim_resource(resource_id).await? {
            tracing::warn!(resource_id, "resource is already checked out");
            return Ok(CheckoutOutcome::Unavailable);
        }
        let loan = LoanEntity::new(self.branch_id.as_str(), resource_id, member_id,
                                   now, policy.loan_days);
        self.loan_repository.create(&loan).await?;
        let _ = self.notifier.notify(member.member_id.as_str(), "Checkout",
                                     format!("\"{}\" is due back {}", resource.title,
                                             loan.due_at.date()).as_str()).await?;
        Ok(CheckoutOutcome::Loaned(LoanDto::from(&loan)))
    }

    async fn returned(&self, member_id: &str, resource_id: &str,
                      now: NaiveDateTime) -> LendingResult<ReturnOutcome> {
        let resource = self.catalog_service.find_resource_by_id(resource_id).await?;
        let mut loan = match self.loan_repository.find_active(member_id, resource_id).await? {
            Some(loan) => loan,
            None => {
                tracing::warn!(member_id, resource_id, "resource is not on loan to member");
                return Ok(ReturnOutcome::NotOnLoan);
            }
        };
        let fine = resource.loan_policy()
            .map(|policy| assess_fine(loan.due_at, now, &policy))
            .unwrap_or(0.0);

        loan.status = LoanStatus::Returned;
        loan.returned_at = Some(now);
        loan.fine_assessed = Some(fine);
        self.loan_repository.update(&loan).await?;
        self.catalog_service.release_resource(resource_id).await?;

        if fine > 0.0 {
            self.member_service.add_fine(member_id, fine).await?;
            let _ = self.notifier.notify(member_id, "Returned Late",
                                         format!("\"{}\" returned with a ${:.2} fine",
                                                 resource.title, fine).as_str()).await?;
        } else {
            let _ = self.notifier.notify(member_id, "Returned",
                                         format!("\"{}\" returned on time", resource.title).as_str()).await?;
        }
        Ok(ReturnOutcome::Returned { loan: LoanDto::from(&loan), fine })
    }

    async fn query_overdue(&self, now: NaiveDateTime, page: Option<&str>,
                           page_size: usize) -> LendingResult<PaginatedResult<LoanDto>> {
        let res = self.loan_repository.query_overdue(now, page, page_size).await?;
        let records = res.records.iter().map(LoanDto::from).collect();
        Ok(PaginatedResult::new(page, page_size, res.next_page, records))
    }

    async fn history(&self, member_id: &str) -> LendingResult<Vec<LoanDto>> {
        let res = self.loan_repository.query(
            &HashMap::from([("member_id".to_string(), member_id.to_string())]), None, 100).await?;
        Ok(res.records.iter().map(LoanDto::from).collect())
    }
}

impl From<&LoanEntity> for LoanDto {
    fn from(other: &LoanEntity) -> LoanDto {
        LoanDto {
            loan_id: other.loan_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            resource_id: other.resource_id.to_string(),
            member_id: other.member_id.to_string(),
            status: other.status,
            checked_out_at: other.checked_out_at,
            due_at: other.due_at,
            returned_at: other.returned_at,
            fine_assessed: other.fine_assessed,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&LoanDto> for LoanEntity {
    fn from(other: &LoanDto) -> LoanEntity {
        LoanEntity {
            loan_id: other.loan_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            resource_id: other.resource_id.to_string(),
            member_id: other.member_id.to_string(),
            status: other.status,
            checked_out_at: other.checked_out_at,
            due_at: other.due_at,
            returned_at: other.returned_at,
            fine_assessed: other.fine_assessed,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use chrono::{Duration, Utc};
    use lazy_static::lazy_static;
    use std::sync::Arc;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::domain::model::ResourceKind;
    use crate::catalog::dto::ResourceDto;
    use crate::catalog::factory::create_catalog_service;
    use crate::core::domain::Configuration;
    use crate::core::lending::{LoanStatus, ResourceStatus};
    use crate::core::repository::RepositoryStore;
    use crate::loans::domain::{CheckoutOutcome, LoanService, ReturnOutcome};
    use crate::loans::factory;
    use crate::members::domain::MemberService;
    use crate::members::dto::MemberDto;
    use crate::members::factory::create_member_service;

    struct Fixture {
        catalog_svc: Arc<dyn CatalogService>,
        member_svc: Arc<dyn MemberService>,
        loan_svc: Box<dyn LoanService>,
    }

    lazy_static! {
        static ref SUT: AsyncOnce<Fixture> = AsyncOnce::new(async {
                let config = Configuration::new("test");
                let catalog_svc: Arc<dyn CatalogService> =
                    Arc::from(create_catalog_service(&config, RepositoryStore::Memory).await);
                let member_svc: Arc<dyn MemberService> =
                    Arc::from(create_member_service(&config, RepositoryStore::Memory).await);
                let loan_svc = factory::create_loan_service(
                    &config, RepositoryStore::Memory,
                    catalog_svc.clone(), member_svc.clone()).await;
                Fixture { catalog_svc, member_svc, loan_svc }
            });
    }

    async fn seed_member(fixture: &Fixture) -> MemberDto {
        let member = MemberDto::new("member@example.com");
        fixture.member_svc.register_member(&member).await.expect("should register member")
    }

    async fn seed_book(fixture: &Fixture, title: &str) -> ResourceDto {
        let book = ResourceDto::new(title, "subject", ResourceKind::Book {
            author: "author".to_string(),
            isbn: "isbn".to_string(),
            page_count: 180,
        });
        fixture.catalog_svc.add_resource(&book).await.expect("should add resource")
    }

    #[tokio::test]
    async fn test_should_checkout_and_return_on_time() {
        let fixture = SUT.get().await;
        let member = seed_member(fixture).await;
        let book = seed_book(fixture, "on time").await;
        let now = Utc::now().naive_utc();

        let outcome = fixture.loan_svc.checkout(
            member.member_id.as_str(), book.resource_id.as_str(), now).await.expect("should checkout");
        let loan = match outcome {
            CheckoutOutcome::Loaned(loan) => loan,
            other => panic!("expected a loan, got {:?}", other),
        };
        assert_eq!(now + Duration::days(14), loan.due_at);

        // returning exactly at the due time costs nothing
        let outcome = fixture.loan_svc.returned(
            member.member_id.as_str(), book.resource_id.as_str(), loan.due_at).await.expect("should return");
        match outcome {
            ReturnOutcome::Returned { loan, fine } => {
                assert_eq!(0.0, fine);
                assert_eq!(LoanStatus::Returned, loan.status);
            }
            other => panic!("expected a return, got {:?}", other),
        }
        let member = fixture.member_svc.find_member_by_id(member.member_id.as_str())
            .await.expect("should find member");
        assert_eq!(0.0, member.outstanding_fines);
    }

    #[tokio::test]
    async fn test_should_fine_late_return_and_accrue_balance() {
        let fixture = SUT.get().await;
        let member = seed_member(fixture).await;
        let book = seed_book(fixture, "late").await;
        // checked out twenty days ago with a fourteen-day window
        let checked_out_at = Utc::now().naive_utc() - Duration::days(20);

        let outcome = fixture.loan_svc.checkout(
            member.member_id.as_str(), book.resource_id.as_str(), checked_out_at)
            .await.expect("should checkout");
        assert!(matches!(outcome, CheckoutOutcome::Loaned(_)));

        let outcome = fixture.loan_svc.returned(
            member.member_id.as_str(), book.resource_id.as_str(), Utc::now().naive_utc())
            .await.expect("should return");
        match outcome {
            ReturnOutcome::Returned { fine, .. } => assert_eq!(3.0, fine),
            other => panic!("expected a return, got {:?}", other),
        }
        let member = fixture.member_svc.find_member_by_id(member.member_id.as_str())
            .await.expect("should find member");
        assert_eq!(3.0, member.outstanding_fines);
    }

    #[tokio::test]
    async fn test_should_refuse_double_checkout_without_state_change() {
        let fixture = SUT.get().await;
        let first = seed_member(fixture).await;
        let second = seed_member(fixture).await;
        let book = seed_book(fixture, "contested").await;
        let now = Utc::now().naive_utc();

        let outcome = fixture.loan_svc.checkout(
            first.member_id.as_str(), book.resource_id.as_str(), now).await.expect("should checkout");
        let loan = match outcome {
            CheckoutOutcome::Loaned(loan) => loan,
            other => panic!("expected a loan, got {:?}", other),
        };

        let outcome = fixture.loan_svc.checkout(
            second.member_id.as_str(), book.resource_id.as_str(), now).await.expect("should refuse");
        assert_eq!(CheckoutOutcome::Unavailable, outcome);

        // occupant and due time are unchanged by the failed attempt
        let active = fixture.loan_svc.history(first.member_id.as_str()).await.expect("history");
        assert_eq!(1, active.len());
        assert_eq!(loan.due_at, active[0].due_at);
        assert!(fixture.loan_svc.history(second.member_id.as_str()).await.expect("history").is_empty());
    }

    #[tokio::test]
    async fn test_should_refuse_checkout_of_digital_resources() {
        let fixture = SUT.get().await;
        let member = seed_member(fixture).await;
        let ebook = ResourceDto::new("digital", "subject", ResourceKind::Ebook {
            author: "author".to_string(),
            format: "EPUB".to_string(),
            file_size_mb: 2.5,
        });
        fixture.catalog_svc.add_resource(&ebook).await.expect("should add resource");

        let outcome = fixture.loan_svc.checkout(
            member.member_id.as_str(), ebook.resource_id.as_str(), Utc::now().naive_utc())
            .await.expect("should refuse");
        assert_eq!(CheckoutOutcome::NotLoanable, outcome);
    }

    #[tokio::test]
    async fn test_should_enforce_loan_limit() {
        let fixture = SUT.get().await;
        let member = seed_member(fixture).await;
        let now = Utc::now().naive_utc();
        for i in 0..5 {
            let book = seed_book(fixture, format!("limit {}", i).as_str()).await;
            let outcome = fixture.loan_svc.checkout(
                member.member_id.as_str(), book.resource_id.as_str(), now).await.expect("should checkout");
            assert!(matches!(outcome, CheckoutOutcome::Loaned(_)));
        }
        let extra = seed_book(fixture, "one too many").await;
        let outcome = fixture.loan_svc.checkout(
            member.member_id.as_str(), extra.resource_id.as_str(), now).await.expect("should refuse");
        assert_eq!(CheckoutOutcome::LimitReached, outcome);
        // the refused resource stays available
        let loaded = fixture.catalog_svc.find_resource_by_id(extra.resource_id.as_str())
            .await.expect("should find resource");
        assert_eq!(ResourceStatus::Available, loaded.status);
    }

    #[tokio::test]
    async fn test_should_report_unheld_return_as_not_on_loan() {
        let fixture = SUT.get().await;
        let member = seed_member(fixture).await;
        let book = seed_book(fixture, "never borrowed").await;

        let outcome = fixture.loan_svc.returned(
            member.member_id.as_str(), book.resource_id.as_str(), Utc::now().naive_utc())
            .await.expect("should refuse");
        assert_eq!(ReturnOutcome::NotOnLoan, outcome);
    }

    #[tokio::test]
    async fn test_should_allow_reborrow_with_unpaid_fines() {
        let fixture = SUT.get().await;
        let member = seed_member(fixture).await;
        let book = seed_book(fixture, "reborrow").await;
        let late_start = Utc::now().naive_utc() - Duration::days(20);

        let _ = fixture.loan_svc.checkout(
            member.member_id.as_str(), book.resource_id.as_str(), late_start).await.expect("checkout");
        let _ = fixture.loan_svc.returned(
            member.member_id.as_str(), book.resource_id.as_str(), Utc::now().naive_utc())
            .await.expect("return");

        let member_loaded = fixture.member_svc.find_member_by_id(member.member_id.as_str())
            .await.expect("should find member");
        assert!(member_loaded.outstanding_fines > 0.0);

        // the unpaid fine does not block a new loan
        let outcome = fixture.loan_svc.checkout(
            member.member_id.as_str(), book.resource_id.as_str(), Utc::now().naive_utc())
            .await.expect("should checkout");
        assert!(matches!(outcome, CheckoutOutcome::Loaned(_)));
    }

    #[tokio::test]
    async fn test_should_query_overdue_loans() {
        let fixture = SUT.get().await;
        let member = seed_member(fixture).await;
        let book = seed_book(fixture, "overdue query").await;
        let now = Utc::now().naive_utc();

        let _ = fixture.loan_svc.checkout(
            member.member_id.as_str(), book.resource_id.as_str(), now - Duration::days(16))
            .await.expect("checkout");
        let res = fixture.loan_svc.query_overdue(now, None, 50).await.expect("should query");
        assert!(res.records.iter().any(|l| l.resource_id == book.resource_id));
    }
}
