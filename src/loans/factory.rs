use std::sync::Arc;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_notifier;
use crate::loans::domain::LoanService;
use crate::loans::domain::service::LoanServiceImpl;
use crate::loans::repository::mem_loan_repository::MemLoanRepository;
use crate::loans::repository::LoanRepository;
use crate::members::domain::MemberService;

pub async fn create_loan_repository(store: RepositoryStore) -> Box<dyn LoanRepository> {
    match store {
        RepositoryStore::Memory => {
            Box::new(MemLoanRepository::new())
        }
    }
}

// Circulation spans the catalog and member services, so the caller passes the
// shared instances in rather than this factory building private ones.
pub async fn create_loan_service(config: &Configuration, store: RepositoryStore,
                                 catalog_service: Arc<dyn CatalogService>,
                                 member_service: Arc<dyn MemberService>) -> Box<dyn LoanService> {
    let loan_repo = create_loan_repository(store).await;
    let notifier = create_notifier(store.notify_via()).await;
    Box::new(LoanServiceImpl::new(config, loan_repo, member_service, catalog_service, notifier))
}
