use crate::db::models::{Test, TestResult};
use crate::db::Catalog;

pub(crate) fn list_by_student(catalog: &Catalog, student_id: &str) -> Vec<TestResult> {
    catalog.test_results.iter().filter(|r| r.student_id == student_id).cloned().collect()
}

pub(crate) fn find_test<'a>(catalog: &'a Catalog, test_id: &str) -> Option<&'a Test> {
    catalog.tests.iter().find(|test| test.id == test_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[test]
    fn results_for_student() {
        let catalog = db::embedded().unwrap();
        let results = list_by_student(&catalog, "student-1");
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.student_id == "student-1"));
        assert!(find_test(&catalog, &results[0].test_id).is_some());
    }
}
