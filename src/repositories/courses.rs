use crate::db::models::Course;
use crate::db::Catalog;

pub(crate) fn list(catalog: &Catalog) -> &[Course] {
    &catalog.courses
}

pub(crate) fn find_by_id<'a>(catalog: &'a Catalog, course_id: &str) -> Option<&'a Course> {
    catalog.courses.iter().find(|course| course.id == course_id)
}

/// The course with `course_id`, or the first course when no id is given.
pub(crate) fn find_or_first<'a>(
    catalog: &'a Catalog,
    course_id: Option<&str>,
) -> Option<&'a Course> {
    match course_id {
        Some(id) => find_by_id(catalog, id),
        None => catalog.courses.first(),
    }
}

pub(crate) fn list_by_instructor<'a>(catalog: &'a Catalog, instructor_id: &str) -> Vec<&'a Course> {
    catalog.courses.iter().filter(|course| course.instructor_id == instructor_id).collect()
}
