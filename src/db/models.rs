use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::core::time::iso_date;
use crate::db::types::{CourseLevel, EnrollmentStatus, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Course {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) instructor: String,
    pub(crate) instructor_id: String,
    pub(crate) category: String,
    pub(crate) level: CourseLevel,
    /// Hours.
    pub(crate) duration: u32,
    pub(crate) students: u32,
    pub(crate) rating: f64,
    pub(crate) price: f64,
    pub(crate) image: String,
    pub(crate) modules: Vec<Module>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Module {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Lesson {
    pub(crate) id: String,
    pub(crate) title: String,
    /// Minutes.
    pub(crate) duration: u32,
    pub(crate) video_url: String,
    pub(crate) resources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Enrollment {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) course_id: String,
    pub(crate) progress: f64,
    pub(crate) completed_lessons: Vec<String>,
    #[serde(with = "iso_date")]
    pub(crate) enrolled_date: Date,
    pub(crate) status: EnrollmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Test {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) questions: Vec<Question>,
    pub(crate) passing_score: f64,
    /// Minutes.
    pub(crate) duration: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Question {
    pub(crate) id: String,
    pub(crate) text: String,
    pub(crate) options: Vec<String>,
    pub(crate) correct_answer: usize,
    pub(crate) explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TestResult {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) test_id: String,
    pub(crate) score: f64,
    pub(crate) passed_status: bool,
    #[serde(with = "iso_date")]
    pub(crate) completed_date: Date,
    pub(crate) answers: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Student {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) avatar: String,
    #[serde(with = "iso_date")]
    pub(crate) join_date: Date,
    pub(crate) total_courses: u32,
    pub(crate) completed_courses: u32,
    pub(crate) average_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Instructor {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) avatar: String,
    pub(crate) bio: String,
    pub(crate) courses: Vec<String>,
    pub(crate) total_students: u32,
    pub(crate) rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Admin {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) avatar: String,
}

/// A demo login. Passwords are stored as plain text in the bundled dataset.
#[derive(Clone, Deserialize)]
pub(crate) struct Credential {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) role: UserRole,
    pub(crate) name: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("name", &self.name)
            .finish()
    }
}

impl Course {
    pub(crate) fn lesson_count(&self) -> usize {
        self.modules.iter().map(|module| module.lessons.len()).sum()
    }
}

impl Module {
    pub(crate) fn total_minutes(&self) -> u32 {
        self.lessons.iter().map(|lesson| lesson.duration).sum()
    }
}
