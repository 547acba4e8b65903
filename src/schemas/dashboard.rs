use serde::Serialize;

use crate::db::types::{EnrollmentStatus, UserRole};
use crate::schemas::course::{CourseCard, LessonView, ModuleOutline};
use crate::services::navigation::Page;
use crate::services::registration::FieldErrors;

#[derive(Debug, Serialize)]
pub(crate) struct ViewResponse {
    pub(crate) role: Option<UserRole>,
    pub(crate) page: Option<Page>,
    #[serde(flatten)]
    pub(crate) model: ViewModel,
}

#[derive(Debug, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "kebab-case")]
pub(crate) enum ViewModel {
    Landing(LandingView),
    Login(LoginView),
    Register(RegisterView),
    StudentDashboard(StudentDashboardView),
    CourseCatalog(CourseCatalogView),
    CoursePlayer(CoursePlayerView),
    CourseDetail(CourseDetailView),
    StudentPerformance(StudentPerformanceView),
    InstructorDashboard(InstructorDashboardView),
    InstructorCourseManagement(InstructorCourseManagementView),
    AdminDashboard(AdminDashboardView),
}

#[derive(Debug, Serialize)]
pub(crate) struct RoleCard {
    pub(crate) role: UserRole,
    pub(crate) title: &'static str,
    pub(crate) default_page: Page,
}

#[derive(Debug, Serialize)]
pub(crate) struct LandingView {
    pub(crate) roles: Vec<RoleCard>,
    pub(crate) course_count: usize,
    pub(crate) categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DemoAccount {
    pub(crate) email: String,
    pub(crate) role: UserRole,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginView {
    pub(crate) email: String,
    pub(crate) error: Option<String>,
    pub(crate) password_cleared: bool,
    pub(crate) demo_accounts: Vec<DemoAccount>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterView {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) role: UserRole,
    pub(crate) errors: FieldErrors,
    pub(crate) roles: [UserRole; 3],
}

#[derive(Debug, Serialize)]
pub(crate) struct Viewer {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) avatar: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct EnrolledCourse {
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) instructor: String,
    pub(crate) image: String,
    pub(crate) progress: f64,
    pub(crate) status: EnrollmentStatus,
}

#[derive(Debug, Serialize)]
pub(crate) struct StudentDashboardView {
    pub(crate) student: Viewer,
    pub(crate) enrolled_courses: usize,
    pub(crate) completed_courses: usize,
    pub(crate) average_score: u32,
    pub(crate) active_courses: Vec<EnrolledCourse>,
    pub(crate) recommended: Vec<CourseCard>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseCatalogView {
    pub(crate) search: Option<String>,
    pub(crate) category: String,
    pub(crate) level: &'static str,
    pub(crate) categories: Vec<String>,
    pub(crate) levels: Vec<&'static str>,
    pub(crate) total: usize,
    pub(crate) courses: Vec<CourseCard>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseDetailView {
    pub(crate) course: CourseCard,
    pub(crate) description: String,
    pub(crate) lesson_count: usize,
    pub(crate) modules: Vec<ModuleOutline>,
    pub(crate) enrolled: bool,
    pub(crate) progress: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CoursePlayerView {
    pub(crate) course_id: String,
    pub(crate) course_title: String,
    pub(crate) module_index: usize,
    pub(crate) lesson_index: usize,
    pub(crate) lesson: Option<LessonView>,
    pub(crate) outline: Vec<ModuleOutline>,
    pub(crate) completed_lessons: Vec<String>,
    pub(crate) progress: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseProgress {
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) progress: f64,
    pub(crate) status: EnrollmentStatus,
}

#[derive(Debug, Serialize)]
pub(crate) struct TestResultRow {
    pub(crate) test_id: String,
    pub(crate) test_title: Option<String>,
    pub(crate) course_title: Option<String>,
    pub(crate) score: f64,
    pub(crate) passed: bool,
    pub(crate) completed_date: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct StudentPerformanceView {
    pub(crate) student: Viewer,
    pub(crate) tests_taken: usize,
    pub(crate) average_score: u32,
    pub(crate) passed: usize,
    pub(crate) course_progress: Vec<CourseProgress>,
    pub(crate) results: Vec<TestResultRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseCompletion {
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) enrollments: usize,
    pub(crate) average_completion: u32,
    pub(crate) rating: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecentEnrollment {
    pub(crate) student_name: String,
    pub(crate) course_title: String,
    pub(crate) enrolled_date: String,
    pub(crate) progress: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct InstructorDashboardView {
    pub(crate) instructor: Viewer,
    pub(crate) bio: String,
    pub(crate) total_courses: usize,
    pub(crate) total_enrollments: usize,
    pub(crate) total_students: usize,
    pub(crate) rating: f64,
    pub(crate) courses: Vec<CourseCompletion>,
    pub(crate) recent_enrollments: Vec<RecentEnrollment>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ManagedCourse {
    #[serde(flatten)]
    pub(crate) card: CourseCard,
    pub(crate) module_count: usize,
    pub(crate) lesson_count: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct InstructorCourseManagementView {
    pub(crate) instructor: Viewer,
    pub(crate) courses: Vec<ManagedCourse>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AdminCourseRow {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) instructor: String,
    pub(crate) category: String,
    pub(crate) students: u32,
    pub(crate) enrollments: usize,
    pub(crate) rating: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct AdminDashboardView {
    pub(crate) admin: Viewer,
    pub(crate) total_users: usize,
    pub(crate) students: usize,
    pub(crate) instructors: usize,
    pub(crate) courses: usize,
    pub(crate) enrollments: usize,
    pub(crate) active_users: usize,
    pub(crate) average_rating: f64,
    pub(crate) course_table: Vec<AdminCourseRow>,
}
