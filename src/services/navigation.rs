//! Typed per-role pages and the router from pages to views.
//!
//! Page ids arrive as strings from clients. Parsing is per role; an id the
//! role does not know falls back to that role's dashboard.

use serde::{Serialize, Serializer};

use crate::db::types::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StudentPage {
    Dashboard,
    Courses,
    Explore,
    CoursePlayer,
    CourseDetail,
    Performance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InstructorPage {
    Dashboard,
    Courses,
    Students,
    Analytics,
    CourseManagement,
    CreateCourse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AdminPage {
    Dashboard,
    Users,
    Courses,
    Analytics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Page {
    Student(StudentPage),
    Instructor(InstructorPage),
    Admin(AdminPage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum View {
    Landing,
    Login,
    Register,
    StudentDashboard,
    CourseCatalog,
    CoursePlayer,
    CourseDetail,
    StudentPerformance,
    InstructorDashboard,
    InstructorCourseManagement,
    AdminDashboard,
}

impl StudentPage {
    const ALL: [StudentPage; 6] = [
        StudentPage::Dashboard,
        StudentPage::Courses,
        StudentPage::Explore,
        StudentPage::CoursePlayer,
        StudentPage::CourseDetail,
        StudentPage::Performance,
    ];

    fn id(self) -> &'static str {
        match self {
            StudentPage::Dashboard => "student-dashboard",
            StudentPage::Courses => "courses",
            StudentPage::Explore => "explore",
            StudentPage::CoursePlayer => "course-player",
            StudentPage::CourseDetail => "course-detail",
            StudentPage::Performance => "performance",
        }
    }

    fn parse(id: &str) -> Option<Self> {
        if id == "dashboard" {
            return Some(StudentPage::Dashboard);
        }
        Self::ALL.into_iter().find(|page| page.id() == id)
    }

    fn view(self) -> View {
        match self {
            StudentPage::Dashboard => View::StudentDashboard,
            StudentPage::Courses | StudentPage::Explore => View::CourseCatalog,
            StudentPage::CoursePlayer => View::CoursePlayer,
            StudentPage::CourseDetail => View::CourseDetail,
            StudentPage::Performance => View::StudentPerformance,
        }
    }
}

impl InstructorPage {
    const ALL: [InstructorPage; 6] = [
        InstructorPage::Dashboard,
        InstructorPage::Courses,
        InstructorPage::Students,
        InstructorPage::Analytics,
        InstructorPage::CourseManagement,
        InstructorPage::CreateCourse,
    ];

    fn id(self) -> &'static str {
        match self {
            InstructorPage::Dashboard => "instructor-dashboard",
            InstructorPage::Courses => "instructor-courses",
            InstructorPage::Students => "instructor-students",
            InstructorPage::Analytics => "instructor-analytics",
            InstructorPage::CourseManagement => "course-management",
            InstructorPage::CreateCourse => "create-course",
        }
    }

    fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.id() == id)
    }

    fn view(self) -> View {
        match self {
            InstructorPage::Dashboard | InstructorPage::Students | InstructorPage::Analytics => {
                View::InstructorDashboard
            }
            InstructorPage::Courses
            | InstructorPage::CourseManagement
            | InstructorPage::CreateCourse => View::InstructorCourseManagement,
        }
    }
}

impl AdminPage {
    const ALL: [AdminPage; 4] =
        [AdminPage::Dashboard, AdminPage::Users, AdminPage::Courses, AdminPage::Analytics];

    fn id(self) -> &'static str {
        match self {
            AdminPage::Dashboard => "admin-dashboard",
            AdminPage::Users => "admin-users",
            AdminPage::Courses => "admin-courses",
            AdminPage::Analytics => "admin-analytics",
        }
    }

    fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.id() == id)
    }
}

impl Page {
    pub(crate) fn default_for(role: UserRole) -> Self {
        match role {
            UserRole::Student => Page::Student(StudentPage::Dashboard),
            UserRole::Instructor => Page::Instructor(InstructorPage::Dashboard),
            UserRole::Admin => Page::Admin(AdminPage::Dashboard),
        }
    }

    /// `None` when `id` is not a page of `role`.
    pub(crate) fn parse(role: UserRole, id: &str) -> Option<Self> {
        match role {
            UserRole::Student => StudentPage::parse(id).map(Page::Student),
            UserRole::Instructor => InstructorPage::parse(id).map(Page::Instructor),
            UserRole::Admin => AdminPage::parse(id).map(Page::Admin),
        }
    }

    pub(crate) fn resolve(role: UserRole, id: &str) -> Self {
        Self::parse(role, id).unwrap_or_else(|| Self::default_for(role))
    }

    pub(crate) fn id(self) -> &'static str {
        match self {
            Page::Student(page) => page.id(),
            Page::Instructor(page) => page.id(),
            Page::Admin(page) => page.id(),
        }
    }

    pub(crate) fn view(self) -> View {
        match self {
            Page::Student(page) => page.view(),
            Page::Instructor(page) => page.view(),
            Page::Admin(_) => View::AdminDashboard,
        }
    }

    /// Every page reachable by `role`, canonical ids only.
    pub(crate) fn all_for(role: UserRole) -> Vec<Page> {
        match role {
            UserRole::Student => StudentPage::ALL.into_iter().map(Page::Student).collect(),
            UserRole::Instructor => {
                InstructorPage::ALL.into_iter().map(Page::Instructor).collect()
            }
            UserRole::Admin => AdminPage::ALL.into_iter().map(Page::Admin).collect(),
        }
    }
}

impl Serialize for Page {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Total: unknown ids land on the role's default view.
pub(crate) fn resolve_page(role: UserRole, page_id: &str) -> View {
    Page::resolve(role, page_id).view()
}
