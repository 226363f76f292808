use chrono::{Duration, NaiveDate};
use lending::core::lending::LendingResult;
use lending::core::repository::RepositoryStore;
use lending::grading::domain::model::{Assessment, AssessmentKind};
use lending::grading::domain::{EnrollOutcome, GradeOutcome, SubmissionOutcome};
use lending::grading::dto::CourseDto;
use lending::grading::factory::create_grading_service;
use lending::utils::telemetry::setup_tracing;

// Runs one student through a course: enroll, submit two of three assessments,
// grade them, and roll up the weighted final grade over graded items only.
#[tokio::main]
async fn main() -> LendingResult<()> {
    setup_tracing();
    let grading_svc = create_grading_service(RepositoryStore::Memory).await;

    let course = grading_svc.create_course(&CourseDto::new("Systems Programming", 4)).await?;
    grading_svc.set_schedule(course.course_id.as_str(), "Tue/Thu 14:00").await?;

    let due = NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date")
        .and_hms_opt(23, 59, 0).expect("valid time");
    let quiz = Assessment::new("Quiz 1", AssessmentKind::Quiz { time_limit_minutes: 30 },
                               due, 0.2)?;
    let assignment = Assessment::new("Assignment 1",
                                     AssessmentKind::Assignment { format: "PDF".to_string() },
                                     due, 0.3)?;
    let project = Assessment::new("Final Project", AssessmentKind::Project { group: true },
                                  due, 0.5)?;
    for assessment in [&quiz, &assignment, &project] {
        grading_svc.add_assessment(course.course_id.as_str(), assessment).await?;
    }

    match grading_svc.enroll("sam", course.course_id.as_str()).await? {
        EnrollOutcome::Enrolled(enrollment) => {
            tracing::info!(slots = enrollment.grades.len(), "enrolled sam");
        }
        EnrollOutcome::AlreadyEnrolled => tracing::warn!("already enrolled"),
    }

    let on_time = due - Duration::days(1);
    for (assessment, score) in [(&quiz, 80.0), (&project, 90.0)] {
        let submitted = grading_svc.submit(course.course_id.as_str(), "sam",
                                           assessment.assessment_id.as_str(), on_time).await?;
        tracing::info!(title = assessment.title, ?submitted, "submitted");
        match grading_svc.record_grade(course.course_id.as_str(), "sam",
                                       assessment.assessment_id.as_str(), score).await? {
            GradeOutcome::Recorded(score) => {
                tracing::info!(title = assessment.title, score, "graded");
            }
            GradeOutcome::NotSubmitted => tracing::warn!("nothing submitted"),
        }
    }

    // the assignment misses its window
    match grading_svc.submit(course.course_id.as_str(), "sam",
                             assignment.assessment_id.as_str(),
                             due + Duration::hours(2)).await? {
        SubmissionOutcome::PastDue => tracing::warn!(title = assignment.title,
                                                     "submission past due"),
        SubmissionOutcome::Accepted => tracing::info!(title = assignment.title, "submitted"),
    }

    // (80 x 0.2 + 90 x 0.5) / 0.7
    match grading_svc.final_grade(course.course_id.as_str(), "sam").await? {
        Some(grade) => tracing::info!(grade, "final grade over graded items"),
        None => tracing::info!("grade pending"),
    }
    Ok(())
}
