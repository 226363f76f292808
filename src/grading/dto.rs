use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::grading::domain::model::{Assessment, GradeRecord};
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CourseDto {
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

impl CourseDto {
    pub fn new(name: &str, credits: i64) -> Self {
        Self {
            course_id: Uuid::new_v4().to_string(),
            version: 0,
            name: name.to_string(),
            credits,
            schedule: "".to_string(),
            assessments: vec![],
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for CourseDto {
    fn id(&self) -> String {
        self.course_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct EnrollmentDto {
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

impl Identifiable for EnrollmentDto {
    fn id(&self) -> String {
        self.enrollment_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
