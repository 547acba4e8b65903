use crate::db::models::Enrollment;
use crate::db::Catalog;

pub(crate) fn list(catalog: &Catalog) -> &[Enrollment] {
    &catalog.enrollments
}

pub(crate) fn list_by_student(catalog: &Catalog, student_id: &str) -> Vec<Enrollment> {
    catalog.enrollments.iter().filter(|e| e.student_id == student_id).cloned().collect()
}

pub(crate) fn list_by_course(catalog: &Catalog, course_id: &str) -> Vec<Enrollment> {
    catalog.enrollments.iter().filter(|e| e.course_id == course_id).cloned().collect()
}

pub(crate) fn list_by_courses(catalog: &Catalog, course_ids: &[&str]) -> Vec<Enrollment> {
    catalog
        .enrollments
        .iter()
        .filter(|e| course_ids.contains(&e.course_id.as_str()))
        .cloned()
        .collect()
}

pub(crate) fn is_enrolled(catalog: &Catalog, student_id: &str, course_id: &str) -> bool {
    catalog.enrollments.iter().any(|e| e.student_id == student_id && e.course_id == course_id)
}
