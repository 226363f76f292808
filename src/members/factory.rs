use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_notifier;
use crate::members::domain::MemberService;
use crate::members::domain::service::MemberServiceImpl;
use crate::members::repository::mem_member_repository::MemMemberRepository;
use crate::members::repository::MemberRepository;

pub async fn create_member_repository(store: RepositoryStore) -> Box<dyn MemberRepository> {
    match store {
        RepositoryStore::Memory => {
            Box::new(MemMemberRepository::new())
        }
    }
}

pub async fn create_member_service(config: &Configuration, store: RepositoryStore) -> Box<dyn MemberService> {
    let member_repo = create_member_repository(store).await;
    let notifier = create_notifier(store.notify_via()).await;
    Box::new(MemberServiceImpl::new(config, member_repo, notifier))
}
