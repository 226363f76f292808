pub mod mem_course_repository;
pub mod mem_enrollment_repository;

use async_trait::async_trait;
use crate::core::lending::LendingResult;
use crate::core::repository::Repository;
use crate::grading::domain::model::{CourseEntity, EnrollmentEntity};

pub trait CourseRepository: Repository<CourseEntity> {
}

#[async_trait]
pub trait EnrollmentRepository: Repository<EnrollmentEntity> {
    async fn find_by_course_and_student(&self, course_id: &str,
                                        student_id: &str) -> LendingResult<Option<EnrollmentEntity>>;

    async fn find_by_course(&self, course_id: &str) -> LendingResult<Vec<EnrollmentEntity>>;
}
