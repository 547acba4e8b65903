use crate::db::models::{Admin, Credential, Instructor, Student};
use crate::db::Catalog;

pub(crate) fn credentials(catalog: &Catalog) -> &[Credential] {
    &catalog.credentials
}

/// Matches by email, falling back to the first student.
pub(crate) fn student_for<'a>(catalog: &'a Catalog, email: Option<&str>) -> Option<&'a Student> {
    email
        .and_then(|email| catalog.students.iter().find(|s| s.email == email))
        .or_else(|| catalog.students.first())
}

/// Matches by email, falling back to the first instructor.
pub(crate) fn instructor_for<'a>(
    catalog: &'a Catalog,
    email: Option<&str>,
) -> Option<&'a Instructor> {
    email
        .and_then(|email| catalog.instructors.iter().find(|i| i.email == email))
        .or_else(|| catalog.instructors.first())
}

pub(crate) fn admin_for<'a>(catalog: &'a Catalog, email: Option<&str>) -> Option<&'a Admin> {
    email
        .and_then(|email| catalog.admins.iter().find(|a| a.email == email))
        .or_else(|| catalog.admins.first())
}

pub(crate) fn find_student<'a>(catalog: &'a Catalog, student_id: &str) -> Option<&'a Student> {
    catalog.students.iter().find(|s| s.id == student_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[test]
    fn viewer_lookup_falls_back_to_first_record() {
        let catalog = db::embedded().unwrap();
        assert_eq!(
            student_for(&catalog, Some("maria.garcia@skill4edge.com")).map(|s| s.id.as_str()),
            Some("student-2")
        );
        assert_eq!(
            student_for(&catalog, Some("new@example.com")).map(|s| s.id.as_str()),
            Some("student-1")
        );
        assert_eq!(instructor_for(&catalog, None).map(|i| i.id.as_str()), Some("instructor-1"));
        assert_eq!(admin_for(&catalog, None).map(|a| a.id.as_str()), Some("admin-1"));
        assert_eq!(find_student(&catalog, "student-3").map(|s| s.name.as_str()), Some("James Wilson"));
    }
}
