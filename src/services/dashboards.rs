//! Builds the data each view renders from the catalog and the session.

use std::collections::HashSet;

use thiserror::Error;

use crate::core::time::format_date;
use crate::db::models::{Course, Enrollment};
use crate::db::types::{EnrollmentStatus, UserRole};
use crate::db::Catalog;
use crate::repositories;
use crate::schemas::course::{outline, CourseCard, LessonView, ViewQuery};
use crate::schemas::dashboard::*;
use crate::services::analytics;
use crate::services::course_filter::{self, CourseFilter, FilterError};
use crate::services::navigation::{Page, View};
use crate::services::session::{AuthPage, SessionState};

const RECOMMENDED_LIMIT: usize = 3;
const RECENT_ENROLLMENTS_LIMIT: usize = 5;

#[derive(Debug, Error)]
pub(crate) enum DashboardError {
    #[error("course not found: {0}")]
    CourseNotFound(String),
    #[error("the catalog has no {0} records")]
    NoViewer(&'static str),
    #[error(transparent)]
    Filter(#[from] FilterError),
}

pub(crate) fn build_view(
    catalog: &Catalog,
    state: &SessionState,
    query: &ViewQuery,
) -> Result<ViewResponse, DashboardError> {
    let (role, page, email) = match state {
        SessionState::Authenticated { role, page, identity } => {
            (Some(*role), Some(*page), identity.as_ref().map(|i| i.email.as_str()))
        }
        SessionState::Unauthenticated(_) => (None, None, None),
    };

    let model = match (state, state.view()) {
        (_, View::Landing) => ViewModel::Landing(landing(catalog)),
        (SessionState::Unauthenticated(AuthPage::Login(form)), _) => ViewModel::Login(LoginView {
            email: form.email.clone(),
            error: form.error.clone(),
            password_cleared: form.password_cleared,
            demo_accounts: repositories::users::credentials(catalog)
                .iter()
                .map(|cred| DemoAccount { email: cred.email.clone(), role: cred.role })
                .collect(),
        }),
        (SessionState::Unauthenticated(AuthPage::Register(form)), _) => {
            ViewModel::Register(RegisterView {
                name: form.name.clone(),
                email: form.email.clone(),
                role: form.role,
                errors: form.errors.clone(),
                roles: [UserRole::Student, UserRole::Instructor, UserRole::Admin],
            })
        }
        (_, View::StudentDashboard) => ViewModel::StudentDashboard(student_dashboard(catalog, email)?),
        (_, View::CourseCatalog) => ViewModel::CourseCatalog(course_catalog(catalog, query)?),
        (_, View::CourseDetail) => {
            ViewModel::CourseDetail(course_detail(catalog, email, query.course_id.as_deref())?)
        }
        (_, View::CoursePlayer) => ViewModel::CoursePlayer(course_player(catalog, email, query)?),
        (_, View::StudentPerformance) => {
            ViewModel::StudentPerformance(student_performance(catalog, email)?)
        }
        (_, View::InstructorDashboard) => {
            ViewModel::InstructorDashboard(instructor_dashboard(catalog, email)?)
        }
        (_, View::InstructorCourseManagement) => {
            ViewModel::InstructorCourseManagement(course_management(catalog, email)?)
        }
        (_, View::AdminDashboard) => ViewModel::AdminDashboard(admin_dashboard(catalog, email)?),
        // Login/Register views only come from their matching auth pages.
        (_, View::Login | View::Register) => ViewModel::Landing(landing(catalog)),
    };

    Ok(ViewResponse { role, page, model })
}

pub(crate) fn landing(catalog: &Catalog) -> LandingView {
    let roles = [
        (UserRole::Student, "Student"),
        (UserRole::Instructor, "Instructor"),
        (UserRole::Admin, "Administrator"),
    ];

    LandingView {
        roles: roles
            .into_iter()
            .map(|(role, title)| RoleCard { role, title, default_page: Page::default_for(role) })
            .collect(),
        course_count: catalog.courses.len(),
        categories: course_filter::categories(&catalog.courses)[1..].to_vec(),
    }
}

pub(crate) fn student_dashboard(
    catalog: &Catalog,
    email: Option<&str>,
) -> Result<StudentDashboardView, DashboardError> {
    let student = repositories::users::student_for(catalog, email)
        .ok_or(DashboardError::NoViewer("student"))?;
    let enrollments = repositories::enrollments::list_by_student(catalog, &student.id);
    let results = repositories::test_results::list_by_student(catalog, &student.id);

    let active_courses = enrollments
        .iter()
        .filter(|e| e.status == EnrollmentStatus::Active)
        .filter_map(|e| enrolled_course(catalog, e))
        .collect();

    let recommended = catalog
        .courses
        .iter()
        .filter(|course| !repositories::enrollments::is_enrolled(catalog, &student.id, &course.id))
        .take(RECOMMENDED_LIMIT)
        .map(CourseCard::from_course)
        .collect();

    Ok(StudentDashboardView {
        student: Viewer {
            id: student.id.clone(),
            name: student.name.clone(),
            email: student.email.clone(),
            avatar: student.avatar.clone(),
        },
        enrolled_courses: enrollments.len(),
        completed_courses: analytics::completed_count(&enrollments),
        average_score: analytics::round_score(analytics::average_score(&results)),
        active_courses,
        recommended,
    })
}

pub(crate) fn course_catalog(
    catalog: &Catalog,
    query: &ViewQuery,
) -> Result<CourseCatalogView, DashboardError> {
    let filter = CourseFilter::from_query(
        query.search.as_deref(),
        query.category.as_deref(),
        query.level.as_deref(),
    )?;
    let courses: Vec<CourseCard> =
        filter.apply(&catalog.courses).into_iter().map(CourseCard::from_course).collect();

    Ok(CourseCatalogView {
        search: filter.search().map(str::to_string),
        category: filter.category_label().to_string(),
        level: filter.level_label(),
        categories: course_filter::categories(&catalog.courses),
        levels: course_filter::levels(),
        total: courses.len(),
        courses,
    })
}

pub(crate) fn course_detail(
    catalog: &Catalog,
    email: Option<&str>,
    course_id: Option<&str>,
) -> Result<CourseDetailView, DashboardError> {
    let course = find_course(catalog, course_id)?;
    let enrollment = viewer_enrollment(catalog, email, &course.id);

    Ok(CourseDetailView {
        course: CourseCard::from_course(course),
        description: course.description.clone(),
        lesson_count: course.lesson_count(),
        modules: outline(course),
        enrolled: enrollment.is_some(),
        progress: enrollment.map(|e| e.progress),
    })
}

pub(crate) fn course_player(
    catalog: &Catalog,
    email: Option<&str>,
    query: &ViewQuery,
) -> Result<CoursePlayerView, DashboardError> {
    let course = find_course(catalog, query.course_id.as_deref())?;
    let enrollment = viewer_enrollment(catalog, email, &course.id);

    let module_index = clamp_index(query.module.unwrap_or(0), course.modules.len());
    let lessons = course.modules.get(module_index).map(|m| m.lessons.as_slice()).unwrap_or(&[]);
    let lesson_index = clamp_index(query.lesson.unwrap_or(0), lessons.len());

    Ok(CoursePlayerView {
        course_id: course.id.clone(),
        course_title: course.title.clone(),
        module_index,
        lesson_index,
        lesson: lessons.get(lesson_index).map(LessonView::from_lesson),
        outline: outline(course),
        completed_lessons: enrollment.map(|e| e.completed_lessons.clone()).unwrap_or_default(),
        progress: enrollment.map_or(0.0, |e| e.progress),
    })
}

pub(crate) fn student_performance(
    catalog: &Catalog,
    email: Option<&str>,
) -> Result<StudentPerformanceView, DashboardError> {
    let student = repositories::users::student_for(catalog, email)
        .ok_or(DashboardError::NoViewer("student"))?;
    let enrollments = repositories::enrollments::list_by_student(catalog, &student.id);
    let results = repositories::test_results::list_by_student(catalog, &student.id);

    let course_progress = enrollments
        .iter()
        .filter_map(|e| {
            let course = repositories::courses::find_by_id(catalog, &e.course_id)?;
            Some(CourseProgress {
                course_id: course.id.clone(),
                title: course.title.clone(),
                progress: e.progress,
                status: e.status,
            })
        })
        .collect();

    let rows = results
        .iter()
        .map(|result| {
            let test = repositories::test_results::find_test(catalog, &result.test_id);
            let course = test
                .and_then(|test| repositories::courses::find_by_id(catalog, &test.course_id));
            TestResultRow {
                test_id: result.test_id.clone(),
                test_title: test.map(|t| t.title.clone()),
                course_title: course.map(|c| c.title.clone()),
                score: result.score,
                passed: result.passed_status,
                completed_date: format_date(result.completed_date),
            }
        })
        .collect();

    Ok(StudentPerformanceView {
        student: Viewer {
            id: student.id.clone(),
            name: student.name.clone(),
            email: student.email.clone(),
            avatar: student.avatar.clone(),
        },
        tests_taken: results.len(),
        average_score: analytics::round_score(analytics::average_score(&results)),
        passed: analytics::pass_count(&results),
        course_progress,
        results: rows,
    })
}

pub(crate) fn instructor_dashboard(
    catalog: &Catalog,
    email: Option<&str>,
) -> Result<InstructorDashboardView, DashboardError> {
    let instructor = repositories::users::instructor_for(catalog, email)
        .ok_or(DashboardError::NoViewer("instructor"))?;
    let owned = repositories::courses::list_by_instructor(catalog, &instructor.id);
    let owned_ids: Vec<&str> = owned.iter().map(|c| c.id.as_str()).collect();
    let mut enrollments = repositories::enrollments::list_by_courses(catalog, &owned_ids);

    let courses = owned
        .iter()
        .map(|course| {
            let course_enrollments: Vec<Enrollment> =
                enrollments.iter().filter(|e| e.course_id == course.id).cloned().collect();
            CourseCompletion {
                course_id: course.id.clone(),
                title: course.title.clone(),
                enrollments: course_enrollments.len(),
                average_completion: analytics::round_score(analytics::average_completion(
                    &course_enrollments,
                )),
                rating: course.rating,
            }
        })
        .collect();

    let total_enrollments = enrollments.len();
    let total_students = analytics::unique_active_users(&enrollments);

    enrollments.sort_by(|a, b| b.enrolled_date.cmp(&a.enrolled_date));
    let recent_enrollments = enrollments
        .iter()
        .take(RECENT_ENROLLMENTS_LIMIT)
        .map(|e| RecentEnrollment {
            student_name: repositories::users::find_student(catalog, &e.student_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| e.student_id.clone()),
            course_title: owned
                .iter()
                .find(|c| c.id == e.course_id)
                .map(|c| c.title.clone())
                .unwrap_or_else(|| e.course_id.clone()),
            enrolled_date: format_date(e.enrolled_date),
            progress: e.progress,
        })
        .collect();

    Ok(InstructorDashboardView {
        instructor: Viewer {
            id: instructor.id.clone(),
            name: instructor.name.clone(),
            email: instructor.email.clone(),
            avatar: instructor.avatar.clone(),
        },
        bio: instructor.bio.clone(),
        total_courses: owned.len(),
        total_enrollments,
        total_students,
        rating: instructor.rating,
        courses,
        recent_enrollments,
    })
}

pub(crate) fn course_management(
    catalog: &Catalog,
    email: Option<&str>,
) -> Result<InstructorCourseManagementView, DashboardError> {
    let instructor = repositories::users::instructor_for(catalog, email)
        .ok_or(DashboardError::NoViewer("instructor"))?;

    let courses = repositories::courses::list_by_instructor(catalog, &instructor.id)
        .into_iter()
        .map(|course| ManagedCourse {
            card: CourseCard::from_course(course),
            module_count: course.modules.len(),
            lesson_count: course.lesson_count(),
        })
        .collect();

    Ok(InstructorCourseManagementView {
        instructor: Viewer {
            id: instructor.id.clone(),
            name: instructor.name.clone(),
            email: instructor.email.clone(),
            avatar: instructor.avatar.clone(),
        },
        courses,
    })
}

pub(crate) fn admin_dashboard(
    catalog: &Catalog,
    email: Option<&str>,
) -> Result<AdminDashboardView, DashboardError> {
    let admin =
        repositories::users::admin_for(catalog, email).ok_or(DashboardError::NoViewer("admin"))?;
    let enrollments = repositories::enrollments::list(catalog);
    let courses = repositories::courses::list(catalog);

    let course_table = courses
        .iter()
        .map(|course| AdminCourseRow {
            id: course.id.clone(),
            title: course.title.clone(),
            instructor: course.instructor.clone(),
            category: course.category.clone(),
            students: course.students,
            enrollments: repositories::enrollments::list_by_course(catalog, &course.id).len(),
            rating: course.rating,
        })
        .collect();

    Ok(AdminDashboardView {
        admin: Viewer {
            id: admin.id.clone(),
            name: admin.name.clone(),
            email: admin.email.clone(),
            avatar: admin.avatar.clone(),
        },
        total_users: catalog.students.len() + catalog.instructors.len(),
        students: catalog.students.len(),
        instructors: catalog.instructors.len(),
        courses: courses.len(),
        enrollments: enrollments.len(),
        active_users: analytics::unique_active_users(enrollments),
        average_rating: analytics::average_rating(courses),
        course_table,
    })
}

fn find_course<'a>(catalog: &'a Catalog, course_id: Option<&str>) -> Result<&'a Course, DashboardError> {
    repositories::courses::find_or_first(catalog, course_id)
        .ok_or_else(|| DashboardError::CourseNotFound(course_id.unwrap_or("<first>").to_string()))
}

/// The enrollment of the session's student in `course_id`, if any.
fn viewer_enrollment<'a>(
    catalog: &'a Catalog,
    email: Option<&str>,
    course_id: &str,
) -> Option<&'a Enrollment> {
    let student = repositories::users::student_for(catalog, email)?;
    repositories::enrollments::list(catalog)
        .iter()
        .find(|e| e.student_id == student.id && e.course_id == course_id)
}

fn enrolled_course(catalog: &Catalog, enrollment: &Enrollment) -> Option<EnrolledCourse> {
    let course = repositories::courses::find_by_id(catalog, &enrollment.course_id)?;
    Some(EnrolledCourse {
        course_id: course.id.clone(),
        title: course.title.clone(),
        instructor: course.instructor.clone(),
        image: course.image.clone(),
        progress: enrollment.progress,
        status: enrollment.status,
    })
}

fn clamp_index(requested: usize, len: usize) -> usize {
    requested.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::services::session::{Identity, SessionEvent};

    fn signed_in(role: UserRole, email: Option<&str>) -> SessionState {
        let state = SessionState::initial();
        match email {
            None => state.apply(SessionEvent::SelectRole(role)).unwrap(),
            Some(email) => state
                .apply(SessionEvent::GoLogin)
                .unwrap()
                .apply(SessionEvent::LoginSucceeded {
                    role,
                    identity: Identity { name: "Viewer".to_string(), email: email.to_string() },
                })
                .unwrap(),
        }
    }

    #[test]
    fn student_dashboard_for_alex() {
        let catalog = db::embedded().unwrap();
        let view = student_dashboard(&catalog, Some("student@skill4edge.com")).unwrap();

        assert_eq!(view.student.id, "student-1");
        assert_eq!(view.enrolled_courses, 5);
        assert_eq!(view.completed_courses, 1);
        assert_eq!(view.average_score, 81);
        assert_eq!(view.active_courses.len(), 3);
        assert!(view.recommended.len() <= RECOMMENDED_LIMIT);
        for card in &view.recommended {
            assert!(!repositories::enrollments::is_enrolled(&catalog, "student-1", &card.id));
        }
    }

    #[test]
    fn role_selection_without_identity_shows_first_record() {
        let catalog = db::embedded().unwrap();
        let state = signed_in(UserRole::Instructor, None);
        let response = build_view(&catalog, &state, &ViewQuery::default()).unwrap();

        let ViewModel::InstructorDashboard(view) = response.model else {
            panic!("expected instructor dashboard");
        };
        assert_eq!(view.instructor.id, "instructor-1");
        assert_eq!(view.total_courses, 3);
        assert!(view.recent_enrollments.len() <= RECENT_ENROLLMENTS_LIMIT);
    }

    #[test]
    fn instructor_dashboard_aggregates_owned_courses() {
        let catalog = db::embedded().unwrap();
        let view = instructor_dashboard(&catalog, Some("instructor@skill4edge.com")).unwrap();

        // course-1 (2), course-2 (2), course-7 (1)
        assert_eq!(view.total_enrollments, 5);
        assert_eq!(view.total_students, 3);
        let react = view.courses.iter().find(|c| c.course_id == "course-1").unwrap();
        assert_eq!(react.enrollments, 2);
        assert_eq!(react.average_completion, 73);

        let dates: Vec<_> = view.recent_enrollments.iter().map(|e| e.enrolled_date.clone()).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[test]
    fn admin_dashboard_totals() {
        let catalog = db::embedded().unwrap();
        let view = admin_dashboard(&catalog, None).unwrap();

        assert_eq!(view.total_users, catalog.students.len() + catalog.instructors.len());
        assert_eq!(view.active_users, 4);
        assert_eq!(view.courses, catalog.courses.len());
        assert_eq!(view.enrollments, catalog.enrollments.len());
        assert_eq!(view.course_table.len(), catalog.courses.len());
        assert!((4.6..=4.7).contains(&view.average_rating));
    }

    #[test]
    fn catalog_view_filters() {
        let catalog = db::embedded().unwrap();
        let query = ViewQuery { category: Some("DevOps".to_string()), ..ViewQuery::default() };
        let view = course_catalog(&catalog, &query).unwrap();

        assert_eq!(view.total, view.courses.len());
        assert!(view.courses.iter().all(|c| c.category == "DevOps"));
        assert_eq!(view.category, "DevOps");
        assert_eq!(view.level, "All");
    }

    #[test]
    fn course_player_clamps_indices() {
        let catalog = db::embedded().unwrap();
        let query = ViewQuery {
            course_id: Some("course-1".to_string()),
            module: Some(99),
            lesson: Some(99),
            ..ViewQuery::default()
        };
        let view = course_player(&catalog, Some("student@skill4edge.com"), &query).unwrap();

        assert_eq!(view.module_index, 2);
        assert_eq!(view.lesson_index, 1);
        assert_eq!(view.lesson.as_ref().map(|l| l.id.as_str()), Some("lesson-1-3-2"));
        assert_eq!(view.progress, 65.0);
    }

    #[test]
    fn course_detail_defaults_to_first_course_and_rejects_unknown() {
        let catalog = db::embedded().unwrap();
        let view = course_detail(&catalog, None, None).unwrap();
        assert_eq!(view.course.id, "course-1");
        assert_eq!(view.lesson_count, 7);
        assert_eq!(view.modules.len(), 3);

        let err = course_detail(&catalog, None, Some("course-404")).unwrap_err();
        assert!(matches!(err, DashboardError::CourseNotFound(id) if id == "course-404"));
    }

    #[test]
    fn performance_lists_results() {
        let catalog = db::embedded().unwrap();
        let view = student_performance(&catalog, Some("student@skill4edge.com")).unwrap();
        assert_eq!(view.tests_taken, 5);
        assert_eq!(view.passed, 4);
        assert_eq!(view.average_score, 81);
        assert_eq!(view.course_progress.len(), 5);
        assert!(view.results.iter().all(|r| r.test_title.is_some()));
    }

    #[test]
    fn unauthenticated_pages_build_auth_views() {
        let catalog = db::embedded().unwrap();
        let login = SessionState::initial().apply(SessionEvent::GoLogin).unwrap();
        let response = build_view(&catalog, &login, &ViewQuery::default()).unwrap();
        assert!(response.role.is_none());
        let ViewModel::Login(view) = response.model else {
            panic!("expected login view");
        };
        assert_eq!(view.demo_accounts.len(), 3);

        let json = serde_json::to_value(
            build_view(&catalog, &SessionState::initial(), &ViewQuery::default()).unwrap(),
        )
        .unwrap();
        assert_eq!(json["view"], "landing");
        assert_eq!(json["data"]["roles"].as_array().map(Vec::len), Some(3));
    }
}
