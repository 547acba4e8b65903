use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::{Course, Lesson, Module};
use crate::db::types::CourseLevel;

/// Query parameters shared by `GET /courses` and `GET /session/view`.
#[derive(Debug, Default, Deserialize, Validate)]
pub(crate) struct ViewQuery {
    #[validate(length(max = 200, message = "search must be at most 200 characters"))]
    #[serde(default)]
    pub(crate) search: Option<String>,
    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) level: Option<String>,
    #[validate(length(min = 1, max = 100, message = "course_id must not be empty"))]
    #[serde(default)]
    pub(crate) course_id: Option<String>,
    #[serde(default)]
    pub(crate) module: Option<usize>,
    #[serde(default)]
    pub(crate) lesson: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseCard {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) instructor: String,
    pub(crate) category: String,
    pub(crate) level: CourseLevel,
    pub(crate) duration_hours: u32,
    pub(crate) students: u32,
    pub(crate) rating: f64,
    pub(crate) price: f64,
    pub(crate) image: String,
}

impl CourseCard {
    pub(crate) fn from_course(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            title: course.title.clone(),
            instructor: course.instructor.clone(),
            category: course.category.clone(),
            level: course.level,
            duration_hours: course.duration,
            students: course.students,
            rating: course.rating,
            price: course.price,
            image: course.image.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LessonSummary {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) duration_minutes: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ModuleOutline {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) lesson_count: usize,
    pub(crate) total_minutes: u32,
    pub(crate) lessons: Vec<LessonSummary>,
}

impl ModuleOutline {
    pub(crate) fn from_module(module: &Module) -> Self {
        Self {
            id: module.id.clone(),
            title: module.title.clone(),
            lesson_count: module.lessons.len(),
            total_minutes: module.total_minutes(),
            lessons: module
                .lessons
                .iter()
                .map(|lesson| LessonSummary {
                    id: lesson.id.clone(),
                    title: lesson.title.clone(),
                    duration_minutes: lesson.duration,
                })
                .collect(),
        }
    }
}

pub(crate) fn outline(course: &Course) -> Vec<ModuleOutline> {
    course.modules.iter().map(ModuleOutline::from_module).collect()
}

#[derive(Debug, Serialize)]
pub(crate) struct LessonView {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) duration_minutes: u32,
    pub(crate) video_url: String,
    pub(crate) resources: Vec<String>,
}

impl LessonView {
    pub(crate) fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.clone(),
            title: lesson.title.clone(),
            duration_minutes: lesson.duration,
            video_url: lesson.video_url.clone(),
            resources: lesson.resources.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseListResponse {
    pub(crate) total: usize,
    pub(crate) courses: Vec<CourseCard>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseDetailResponse {
    #[serde(flatten)]
    pub(crate) card: CourseCard,
    pub(crate) description: String,
    pub(crate) lesson_count: usize,
    pub(crate) modules: Vec<ModuleOutline>,
}

impl CourseDetailResponse {
    pub(crate) fn from_course(course: &Course) -> Self {
        Self {
            card: CourseCard::from_course(course),
            description: course.description.clone(),
            lesson_count: course.lesson_count(),
            modules: outline(course),
        }
    }
}
