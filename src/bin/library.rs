use std::collections::HashMap;
use std::sync::Arc;
use chrono::{Duration, Utc};
use lending::catalog::domain::CatalogService;
use lending::catalog::factory::{build_resource, create_catalog_service};
use lending::core::domain::Configuration;
use lending::core::lending::LendingResult;
use lending::core::repository::RepositoryStore;
use lending::loans::domain::{CheckoutOutcome, ReturnOutcome};
use lending::loans::factory::create_loan_service;
use lending::members::domain::{MemberService, PaymentOutcome};
use lending::members::dto::MemberDto;
use lending::members::factory::create_member_service;
use lending::utils::telemetry::setup_tracing;

// Walks a branch through a late return: a book checked out twenty days ago on
// a fourteen-day window comes back six days late and costs three dollars.
#[tokio::main]
async fn main() -> LendingResult<()> {
    setup_tracing();
    let config = Configuration::new("main-branch");
    let catalog_svc: Arc<dyn CatalogService> =
        Arc::from(create_catalog_service(&config, RepositoryStore::Memory).await);
    let member_svc: Arc<dyn MemberService> =
        Arc::from(create_member_service(&config, RepositoryStore::Memory).await);
    let loan_svc = create_loan_service(&config, RepositoryStore::Memory,
                                       catalog_svc.clone(), member_svc.clone()).await;

    let member = member_svc.register_member(&MemberDto::new("alice@example.com")).await?;
    tracing::info!(member_id = member.member_id, "registered member");

    let book = catalog_svc.add_resource(&build_resource("book", &HashMap::from([
        ("title".to_string(), "The Great Gatsby".to_string()),
        ("subject".to_string(), "Classic Literature".to_string()),
        ("author".to_string(), "F. Scott Fitzgerald".to_string()),
        ("isbn".to_string(), "978-0743273565".to_string()),
        ("page_count".to_string(), "180".to_string()),
    ]))?).await?;
    let ebook = catalog_svc.add_resource(&build_resource("ebook", &HashMap::from([
        ("title".to_string(), "Refactoring".to_string()),
        ("subject".to_string(), "Software".to_string()),
        ("author".to_string(), "Martin Fowler".to_string()),
        ("format".to_string(), "EPUB".to_string()),
        ("file_size_mb".to_string(), "4.2".to_string()),
    ]))?).await?;

    // digital resources are browsable but never loaned
    let outcome = loan_svc.checkout(member.member_id.as_str(), ebook.resource_id.as_str(),
                                    Utc::now().naive_utc()).await?;
    tracing::info!(?outcome, title = ebook.title, "attempted to checkout an ebook");

    let checked_out_at = Utc::now().naive_utc() - Duration::days(20);
    match loan_svc.checkout(member.member_id.as_str(), book.resource_id.as_str(),
                            checked_out_at).await? {
        CheckoutOutcome::Loaned(loan) => {
            tracing::info!(loan_id = loan.loan_id, due_at = %loan.due_at,
                           "checked out \"{}\"", book.title);
        }
        other => tracing::warn!(?other, "checkout refused"),
    }

    let overdue = loan_svc.query_overdue(Utc::now().naive_utc(), None, 50).await?;
    tracing::info!(count = overdue.records.len(), "overdue loans on the books");

    match loan_svc.returned(member.member_id.as_str(), book.resource_id.as_str(),
                            Utc::now().naive_utc()).await? {
        ReturnOutcome::Returned { fine, .. } => {
            tracing::info!(fine, "returned \"{}\" six days late", book.title);
        }
        ReturnOutcome::NotOnLoan => tracing::warn!("resource was not on loan"),
    }

    for amount in [2.0, 10.0, 0.0] {
        match member_svc.pay_fine(member.member_id.as_str(), amount).await? {
            PaymentOutcome::Applied { paid, outstanding } => {
                tracing::info!(offered = amount, paid, outstanding, "payment applied");
            }
            PaymentOutcome::NonPositiveAmount => {
                tracing::warn!(offered = amount, "payment refused");
            }
        }
    }

    let member = member_svc.find_member_by_id(member.member_id.as_str()).await?;
    tracing::info!(outstanding = member.outstanding_fines, "closing balance");
    Ok(())
}
