use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::lending::{LendingError, LendingResult};
use crate::grading::dto::{CourseDto, EnrollmentDto};
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum AssessmentKind {
    Quiz {
        time_limit_minutes: i64,
    },
    Assignment {
        format: String,
    },
    Project {
        group: bool,
    },
}

impl AssessmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            AssessmentKind::Quiz { .. } => "quiz",
            AssessmentKind::Assignment { .. } => "assignment",
            AssessmentKind::Project { .. } => "project",
        }
    }
}

// Assessment carries its weight in the final grade. A weight outside [0, 1]
// is a construction failure, not a recoverable outcome.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub assessment_id: String,
    pub title: String,
    pub kind: AssessmentKind,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    pub weight: f64,
}

impl Assessment {
    pub fn new(title: &str, kind: AssessmentKind, due_at: NaiveDateTime,
               weight: f64) -> LendingResult<Self> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(LendingError::validation(
                format!("assessment weight {} must be between 0 and 1", weight).as_str(), None));
        }
        Ok(Self {
            assessment_id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            kind,
            due_at,
            weight,
        })
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CourseEntity {
    pub course_id: String,
    pub version: i64,
    pub name: String,
    pub credits: i64,
    pub schedule: String,
    pub assessments: Vec<Assessment>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl CourseEntity {
    pub fn assessment(&self, assessment_id: &str) -> Option<&Assessment> {
        self.assessments.iter().find(|a| a.assessment_id == assessment_id)
    }
}

impl Identifiable for CourseEntity {
    fn id(&self) -> String {
        self.course_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// One slot per course assessment; the score stays None until a grade is
// recorded, so a missing score reads as pending.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GradeRecord {
    pub assessment_id: String,
    pub weight: f64,
    pub score: Option<f64>,
    pub submitted_at: Option<NaiveDateTime>,
}

impl GradeRecord {
    pub fn pending(assessment: &Assessment) -> Self {
        Self {
            assessment_id: assessment.assessment_id.to_string(),
            weight: assessment.weight,
            score: None,
            submitted_at: None,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct EnrollmentEntity {
    pub enrollment_id: String,
    pub version: i64,
    pub course_id: String,
    pub student_id: String,
    pub grades: Vec<GradeRecord>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl EnrollmentEntity {
    pub fn new(course_id: &str, student_id: &str, assessments: &[Assessment]) -> Self {
        Self {
            enrollment_id: Uuid::new_v4().to_string(),
            version: 0,
            course_id: course_id.to_string(),
            student_id: student_id.to_string(),
            grades: assessments.iter().map(GradeRecord::pending).collect(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn grade_mut(&mut self, assessment_id: &str) -> Option<&mut GradeRecord> {
        self.grades.iter_mut().find(|g| g.assessment_id == assessment_id)
    }
}

impl Identifiable for EnrollmentEntity {
    fn id(&self) -> String {
        self.enrollment_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl From<&CourseDto> for CourseEntity {
    fn from(other: &CourseDto) -> CourseEntity {
        CourseEntity {
            course_id: other.course_id.to_string(),
            version: other.version,
            name: other.name.to_string(),
            credits: other.credits,
            schedule: other.schedule.to_string(),
            assessments: other.assessments.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&CourseEntity> for CourseDto {
    fn from(other: &CourseEntity) -> CourseDto {
        CourseDto {
            course_id: other.course_id.to_string(),
            version: other.version,
            name: other.name.to_string(),
            credits: other.credits,
            schedule: other.schedule.to_string(),
            assessments: other.assessments.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&EnrollmentEntity> for EnrollmentDto {
    fn from(other: &EnrollmentEntity) -> EnrollmentDto {
        EnrollmentDto {
            enrollment_id: other.enrollment_id.to_string(),
            version: other.version,
            course_id: other.course_id.to_string(),
            student_id: other.student_id.to_string(),
            grades: other.grades.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
