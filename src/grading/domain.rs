pub mod model;
pub mod service;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::core::lending::LendingResult;
use crate::grading::domain::model::{Assessment, GradeRecord};
use crate::grading::dto::{CourseDto, EnrollmentDto};

// Weighted average over graded items only. Pending when nothing is graded, or
// when every graded item carries zero weight (a zero-weight set defines no
// average).
pub fn final_grade(records: &[GradeRecord]) -> Option<f64> {
    let graded: Vec<&GradeRecord> = records.iter().filter(|r| r.score.is_some()).collect();
    if graded.is_empty() {
        return None;
    }
    let total_weight: f64 = graded.iter().map(|r| r.weight).sum();
    if total_weight == 0.0 {
        return None;
    }
    let weighted: f64 = graded.iter()
        .map(|r| r.score.unwrap_or(0.0) * r.weight)
        .sum();
    Some(weighted / total_weight)
}

#[derive(Debug, PartialEq, Clone)]
pub enum EnrollOutcome {
    Enrolled(EnrollmentDto),
    AlreadyEnrolled,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SubmissionOutcome {
    Accepted,
    // strictly after the due time is late
    PastDue,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum GradeOutcome {
    // the score as recorded, after clamping into [0, 100]
    Recorded(f64),
    NotSubmitted,
}

#[async_trait]
pub trait GradingService: Sync + Send {
    async fn create_course(&self, course: &CourseDto) -> LendingResult<CourseDto>;
    async fn find_course_by_id(&self, id: &str) -> LendingResult<CourseDto>;
    // false on a duplicate assessment id; enrolled students get a pending
    // grade record and a broadcast
    async fn add_assessment(&self, course_id: &str, assessment: &Assessment) -> LendingResult<bool>;
    async fn set_schedule(&self, course_id: &str, schedule: &str) -> LendingResult<CourseDto>;
    async fn enroll(&self, student_id: &str, course_id: &str) -> LendingResult<EnrollOutcome>;
    async fn submit(&self, course_id: &str, student_id: &str, assessment_id: &str,
                    now: NaiveDateTime) -> LendingResult<SubmissionOutcome>;
    async fn record_grade(&self, course_id: &str, student_id: &str, assessment_id: &str,
                          score: f64) -> LendingResult<GradeOutcome>;
    async fn final_grade(&self, course_id: &str, student_id: &str) -> LendingResult<Option<f64>>;
}
