use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::core::lending::{LendingError, LendingResult};
use crate::gateway::notifier::Notifier;
use crate::grading::domain::model::{Assessment, CourseEntity, EnrollmentEntity, GradeRecord};
use crate::grading::domain::{final_grade, EnrollOutcome, GradeOutcome, GradingService,
                             SubmissionOutcome};
use crate::grading::dto::{CourseDto, EnrollmentDto};
use crate::grading::repository::{CourseRepository, EnrollmentRepository};

pub struct GradingServiceImpl {
    course_repository: Box<dyn CourseRepository>,
    enrollment_repository: Box<dyn EnrollmentRepository>,
    notifier: Box<dyn Notifier>,
}

impl GradingServiceImpl {
    pub fn new(course_repository: Box<dyn CourseRepository>,
               enrollment_repository: Box<dyn EnrollmentRepository>,
               notifier: Box<dyn Notifier>) -> Self {
        Self {
            course_repository,
            enrollment_repository,
            notifier,
        }
    }

    async fn find_enrollment(&self, course_id: &str,
                             student_id: &str) -> LendingResult<EnrollmentEntity> {
        self.enrollment_repository.find_by_course_and_student(course_id, student_id).await?
            .ok_or_else(|| LendingError::not_found(
                format!("student {} is not enrolled in course {}", student_id, course_id).as_str()))
    }
}

#[async_trait]
impl GradingService for GradingServiceImpl {
    async fn create_course(&self, course: &CourseDto) -> LendingResult<CourseDto> {
        let entity = CourseEntity::from(course);
        self.course_repository.create(&entity).await?;
        tracing::info!(course_id = entity.course_id, name = entity.name, "created course");
        Ok(CourseDto::from(&entity))
    }

    async fn find_course_by_id(&self, id: &str) -> LendingResult<CourseDto> {
        let entity = self.course_repository.get(id).await?;
        Ok(CourseDto::from(&entity))
    }

    async fn add_assessment(&self, course_id: &str, assessment: &Assessment) -> LendingResult<bool> {
        let mut course = self.course_repository.get(course_id).await?;
        if course.assessment(assessment.assessment_id.as_str()).is_some() {
            tracing::warn!(course_id, assessment_id = assessment.assessment_id,
                           "assessment already exists");
            return Ok(false);
        }
        course.assessments.push(assessment.clone());
        self.course_repository.update(&course).await?;

        // students already enrolled get a pending slot for the new assessment
        let enrollments = self.enrollment_repository.find_by_course(course_id).await?;
        let mut students = Vec::new();
        for mut enrollment in enrollments {
            enrollment.grades.push(GradeRecord::pending(assessment));
            self.enrollment_repository.update(&enrollment).await?;
            students.push(enrollment.student_id);
        }
        if !students.is_empty() {
            let _ = self.notifier.broadcast(&students, "New Assessment",
                                            format!("{} \"{}\" added to {}, due {}",
                                                    assessment.kind.label(), assessment.title,
                                                    course.name, assessment.due_at.date()).as_str()).await?;
        }
        Ok(true)
    }

    async fn set_schedule(&self, course_id: &str, schedule: &str) -> LendingResult<CourseDto> {
        let mut course = self.course_repository.get(course_id).await?;
        course.schedule = schedule.to_string();
        self.course_repository.update(&course).await?;
        let course = self.course_repository.get(course_id).await?;
        Ok(CourseDto::from(&course))
    }

    async fn enroll(&self, student_id: &str, course_id: &str) -> LendingResult<EnrollOutcome> {
        let course = self.course_repository.get(course_id).await?;
        if self.enrollment_repository.find_by_course_and_student(course_id, student_id)
            .await?.is_some() {
            tracing::warn!(student_id, course_id, "student is already enrolled");
            return Ok(EnrollOutcome::AlreadyEnrolled);
        }
        let enrollment = EnrollmentEntity::new(course_id, student_id, &course.assessments);
        self.enrollment_repository.create(&enrollment).await?;
        let _ = self.notifier.notify(student_id, "Enrolled",
                                     format!("enrolled in {}", course.name).as_str()).await?;
        Ok(EnrollOutcome::Enrolled(EnrollmentDto::from(&enrollment)))
    }

    async fn submit(&self, course_id: &str, student_id: &str, assessment_id: &str,
                    now: NaiveDateTime) -> LendingResult<SubmissionOutcome> {
        let course = self.course_repository.get(course_id).await?;
        let assessment = course.assessment(assessment_id).ok_or_else(||
            LendingError::not_found(
                format!("assessment {} not found in course {}", assessment_id, course_id).as_str()))?;
        let mut enrollment = self.find_enrollment(course_id, student_id).await?;

        // exactly at the due time still counts
        if now > assessment.due_at {
            tracing::warn!(student_id, assessment_id, "submission is past due");
            return Ok(SubmissionOutcome::PastDue);
        }
        let record = enrollment.grade_mut(assessment_id).ok_or_else(||
            LendingError::not_found(
                format!("no grade record for assessment {}", assessment_id).as_str()))?;
        record.submitted_at = Some(now);
        self.enrollment_repository.update(&enrollment).await?;
        Ok(SubmissionOutcome::Accepted)
    }

    async fn record_grade(&self, course_id: &str, student_id: &str, assessment_id: &str,
                          score: f64) -> LendingResult<GradeOutcome> {
        let mut enrollment = self.find_enrollment(course_id, student_id).await?;
        let record = enrollment.grade_mut(assessment_id).ok_or_else(||
            LendingError::not_found(
                format!("no grade record for assessment {}", assessment_id).as_str()))?;
        if record.submitted_at.is_none() {
            tracing::warn!(student_id, assessment_id, "nothing submitted to grade");
            return Ok(GradeOutcome::NotSubmitted);
        }
        let clamped = score.clamp(0.0, 100.0);
        record.score = Some(clamped);
        self.enrollment_repository.update(&enrollment).await?;
        Ok(GradeOutcome::Recorded(clamped))
    }

    async fn final_grade(&self, course_id: &str, student_id: &str) -> LendingResult<Option<f64>> {
        let enrollment = self.find_enrollment(course_id, student_id).await?;
        Ok(final_grade(&enrollment.grades))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use crate::core::repository::RepositoryStore;
    use crate::grading::domain::model::{Assessment, AssessmentKind};
    use crate::grading::domain::{EnrollOutcome, GradeOutcome, GradingService, SubmissionOutcome};
    use crate::grading::dto::CourseDto;
    use crate::grading::factory::create_grading_service;

    fn due() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap().and_hms_opt(23, 59, 0).unwrap()
    }

    async fn course_with_assessments(svc: &dyn GradingService) -> (CourseDto, Vec<Assessment>) {
        let course = svc.create_course(&CourseDto::new("Systems Programming", 4))
            .await.expect("should create course");
        let assessments = vec![
            Assessment::new("Quiz 1", AssessmentKind::Quiz { time_limit_minutes: 30 },
                            due(), 0.2).expect("valid"),
            Assessment::new("Assignment 1", AssessmentKind::Assignment {
                format: "PDF".to_string() }, due(), 0.3).expect("valid"),
            Assessment::new("Final Project", AssessmentKind::Project { group: true },
                            due(), 0.5).expect("valid"),
        ];
        for assessment in assessments.iter() {
            assert!(svc.add_assessment(course.course_id.as_str(), assessment)
                .await.expect("should add"));
        }
        (course, assessments)
    }

    #[tokio::test]
    async fn test_should_roll_up_graded_items_only() {
        let svc = create_grading_service(RepositoryStore::Memory).await;
        let (course, assessments) = course_with_assessments(svc.as_ref()).await;
        let outcome = svc.enroll("s1", course.course_id.as_str()).await.expect("should enroll");
        assert!(matches!(outcome, EnrollOutcome::Enrolled(_)));

        let on_time = due() - Duration::days(1);
        for (assessment, score) in [(&assessments[0], 80.0), (&assessments[2], 90.0)] {
            let submitted = svc.submit(course.course_id.as_str(), "s1",
                                       assessment.assessment_id.as_str(), on_time)
                .await.expect("should submit");
            assert_eq!(SubmissionOutcome::Accepted, submitted);
            let graded = svc.record_grade(course.course_id.as_str(), "s1",
                                          assessment.assessment_id.as_str(), score)
                .await.expect("should grade");
            assert_eq!(GradeOutcome::Recorded(score), graded);
        }

        // the ungraded assignment contributes to neither sum
        let grade = svc.final_grade(course.course_id.as_str(), "s1")
            .await.expect("should roll up").expect("graded");
        assert!((grade - 61.0 / 0.7).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_should_stay_pending_with_no_grades() {
        let svc = create_grading_service(RepositoryStore::Memory).await;
        let (course, _) = course_with_assessments(svc.as_ref()).await;
        svc.enroll("s1", course.course_id.as_str()).await.expect("should enroll");
        assert_eq!(None, svc.final_grade(course.course_id.as_str(), "s1")
            .await.expect("should roll up"));
    }

    #[tokio::test]
    async fn test_should_refuse_past_due_submission() {
        let svc = create_grading_service(RepositoryStore::Memory).await;
        let (course, assessments) = course_with_assessments(svc.as_ref()).await;
        svc.enroll("s1", course.course_id.as_str()).await.expect("should enroll");

        // exactly at the due time still counts
        assert_eq!(SubmissionOutcome::Accepted,
                   svc.submit(course.course_id.as_str(), "s1",
                              assessments[0].assessment_id.as_str(), due())
                       .await.expect("should submit"));
        assert_eq!(SubmissionOutcome::PastDue,
                   svc.submit(course.course_id.as_str(), "s1",
                              assessments[1].assessment_id.as_str(),
                              due() + Duration::seconds(1))
                       .await.expect("should refuse"));
    }

    #[tokio::test]
    async fn test_should_refuse_grading_without_submission() {
        let svc = create_grading_service(RepositoryStore::Memory).await;
        let (course, assessments) = course_with_assessments(svc.as_ref()).await;
        svc.enroll("s1", course.course_id.as_str()).await.expect("should enroll");
        assert_eq!(GradeOutcome::NotSubmitted,
                   svc.record_grade(course.course_id.as_str(), "s1",
                                    assessments[0].assessment_id.as_str(), 95.0)
                       .await.expect("should refuse"));
    }

    #[tokio::test]
    async fn test_should_clamp_scores_into_range() {
        let svc = create_grading_service(RepositoryStore::Memory).await;
        let (course, assessments) = course_with_assessments(svc.as_ref()).await;
        svc.enroll("s1", course.course_id.as_str()).await.expect("should enroll");
        svc.submit(course.course_id.as_str(), "s1",
                   assessments[0].assessment_id.as_str(), due()).await.expect("should submit");

        assert_eq!(GradeOutcome::Recorded(100.0),
                   svc.record_grade(course.course_id.as_str(), "s1",
                                    assessments[0].assessment_id.as_str(), 150.0)
                       .await.expect("should clamp"));
        assert_eq!(GradeOutcome::Recorded(0.0),
                   svc.record_grade(course.course_id.as_str(), "s1",
                                    assessments[0].assessment_id.as_str(), -10.0)
                       .await.expect("should clamp"));
    }

    #[tokio::test]
    async fn test_should_refuse_duplicate_enrollment_and_assessment() {
        let svc = create_grading_service(RepositoryStore::Memory).await;
        let (course, assessments) = course_with_assessments(svc.as_ref()).await;

        svc.enroll("s1", course.course_id.as_str()).await.expect("should enroll");
        assert_eq!(EnrollOutcome::AlreadyEnrolled,
                   svc.enroll("s1", course.course_id.as_str()).await.expect("should refuse"));
        assert!(!svc.add_assessment(course.course_id.as_str(), &assessments[0])
            .await.expect("should refuse"));
    }

    #[tokio::test]
    async fn test_should_backfill_grade_records_for_enrolled_students() {
        let svc = create_grading_service(RepositoryStore::Memory).await;
        let course = svc.create_course(&CourseDto::new("Algorithms", 3))
            .await.expect("should create course");
        let outcome = svc.enroll("s1", course.course_id.as_str()).await.expect("should enroll");
        match outcome {
            EnrollOutcome::Enrolled(enrollment) => assert!(enrollment.grades.is_empty()),
            other => panic!("expected an enrollment, got {:?}", other),
        }

        let quiz = Assessment::new("Quiz 1", AssessmentKind::Quiz { time_limit_minutes: 20 },
                                   due(), 0.25).expect("valid");
        assert!(svc.add_assessment(course.course_id.as_str(), &quiz)
            .await.expect("should add"));

        // the late-added quiz shows up as a pending slot
        svc.submit(course.course_id.as_str(), "s1", quiz.assessment_id.as_str(), due())
            .await.expect("should submit");
        let graded = svc.record_grade(course.course_id.as_str(), "s1",
                                      quiz.assessment_id.as_str(), 88.0)
            .await.expect("should grade");
        assert_eq!(GradeOutcome::Recorded(88.0), graded);
        assert_eq!(Some(88.0), svc.final_grade(course.course_id.as_str(), "s1")
            .await.expect("should roll up"));
    }

    #[tokio::test]
    async fn test_should_update_schedule() {
        let svc = create_grading_service(RepositoryStore::Memory).await;
        let course = svc.create_course(&CourseDto::new("Databases", 3))
            .await.expect("should create course");
        let updated = svc.set_schedule(course.course_id.as_str(), "Mon/Wed 10:00")
            .await.expect("should update");
        assert_eq!("Mon/Wed 10:00", updated.schedule.as_str());
    }
}
