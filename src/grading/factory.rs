use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_notifier;
use crate::grading::domain::service::GradingServiceImpl;
use crate::grading::domain::GradingService;
use crate::grading::repository::mem_course_repository::MemCourseRepository;
use crate::grading::repository::mem_enrollment_repository::MemEnrollmentRepository;
use crate::grading::repository::{CourseRepository, EnrollmentRepository};

pub async fn create_course_repository(store: RepositoryStore) -> Box<dyn CourseRepository> {
    match store {
        RepositoryStore::Memory => {
            Box::new(MemCourseRepository::new())
        }
    }
}

pub async fn create_enrollment_repository(store: RepositoryStore) -> Box<dyn EnrollmentRepository> {
    match store {
        RepositoryStore::Memory => {
            Box::new(MemEnrollmentRepository::new())
        }
    }
}

pub async fn create_grading_service(store: RepositoryStore) -> Box<dyn GradingService> {
    let course_repo = create_course_repository(store).await;
    let enrollment_repo = create_enrollment_repository(store).await;
    let notifier = create_notifier(store.notify_via()).await;
    Box::new(GradingServiceImpl::new(course_repo, enrollment_repo, notifier))
}
