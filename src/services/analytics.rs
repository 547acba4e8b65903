//! Pure reducers over catalog slices. None of them mutate their input and
//! all of them return 0 for an empty slice instead of NaN.

use std::collections::HashSet;

use crate::db::models::{Course, Enrollment, TestResult};
use crate::db::types::EnrollmentStatus;

pub(crate) fn average_rating(courses: &[Course]) -> f64 {
    round_to_tenth(mean(courses.iter().map(|course| course.rating)))
}

pub(crate) fn unique_active_users(enrollments: &[Enrollment]) -> usize {
    enrollments.iter().map(|e| e.student_id.as_str()).collect::<HashSet<_>>().len()
}

pub(crate) fn average_completion(enrollments: &[Enrollment]) -> f64 {
    mean(enrollments.iter().map(|e| e.progress))
}

pub(crate) fn average_score(results: &[TestResult]) -> f64 {
    mean(results.iter().map(|r| r.score))
}

pub(crate) fn pass_count(results: &[TestResult]) -> usize {
    results.iter().filter(|r| r.passed_status).count()
}

pub(crate) fn completed_count(enrollments: &[Enrollment]) -> usize {
    enrollments.iter().filter(|e| e.status == EnrollmentStatus::Completed).count()
}

/// Whole-number display value; halves round away from zero.
pub(crate) fn round_score(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
