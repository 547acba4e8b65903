pub(crate) mod models;
pub(crate) mod types;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::config::Settings;
use crate::db::models::{
    Admin, Course, Credential, Enrollment, Instructor, Student, Test, TestResult,
};

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// The bundled dataset. Loaded once at startup and never mutated afterwards.
#[derive(Debug, Deserialize)]
pub(crate) struct Catalog {
    pub(crate) credentials: Vec<Credential>,
    pub(crate) students: Vec<Student>,
    pub(crate) instructors: Vec<Instructor>,
    pub(crate) admins: Vec<Admin>,
    pub(crate) courses: Vec<Course>,
    pub(crate) enrollments: Vec<Enrollment>,
    #[serde(default)]
    pub(crate) tests: Vec<Test>,
    pub(crate) test_results: Vec<TestResult>,
}

#[derive(Debug, Error)]
pub(crate) enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate {collection} id: {id}")]
    DuplicateId { collection: &'static str, id: String },
    #[error("{collection} {id} references unknown {field}: {target}")]
    MissingReference { collection: &'static str, id: String, field: &'static str, target: String },
    #[error("{collection} {id} has {field} out of range: {value}")]
    OutOfRange { collection: &'static str, id: String, field: &'static str, value: f64 },
}

pub(crate) fn load(settings: &Settings) -> Result<Catalog, CatalogError> {
    match settings.catalog().path.as_deref() {
        Some(path) => load_file(path),
        None => from_json(EMBEDDED_CATALOG),
    }
}

pub(crate) fn load_file(path: &Path) -> Result<Catalog, CatalogError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| CatalogError::Read { path: path.to_path_buf(), source })?;
    from_json(&raw)
}

pub(crate) fn embedded() -> Result<Catalog, CatalogError> {
    from_json(EMBEDDED_CATALOG)
}

pub(crate) fn from_json(raw: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_json::from_str(raw)?;
    catalog.validate()?;
    Ok(catalog)
}

impl Catalog {
    fn validate(&self) -> Result<(), CatalogError> {
        let course_ids = unique_ids("course", self.courses.iter().map(|c| c.id.as_str()))?;
        let student_ids = unique_ids("student", self.students.iter().map(|s| s.id.as_str()))?;
        let instructor_ids =
            unique_ids("instructor", self.instructors.iter().map(|i| i.id.as_str()))?;
        unique_ids("admin", self.admins.iter().map(|a| a.id.as_str()))?;
        unique_ids("enrollment", self.enrollments.iter().map(|e| e.id.as_str()))?;
        let test_ids = unique_ids("test", self.tests.iter().map(|t| t.id.as_str()))?;
        unique_ids("test result", self.test_results.iter().map(|r| r.id.as_str()))?;

        for course in &self.courses {
            require_ref("course", &course.id, "instructor_id", &course.instructor_id, &instructor_ids)?;
            require_range("course", &course.id, "rating", course.rating, 0.0, 5.0)?;
        }

        for instructor in &self.instructors {
            require_range("instructor", &instructor.id, "rating", instructor.rating, 0.0, 5.0)?;
            for course_id in &instructor.courses {
                require_ref("instructor", &instructor.id, "course", course_id, &course_ids)?;
            }
        }

        for enrollment in &self.enrollments {
            require_ref("enrollment", &enrollment.id, "student_id", &enrollment.student_id, &student_ids)?;
            require_ref("enrollment", &enrollment.id, "course_id", &enrollment.course_id, &course_ids)?;
            require_range("enrollment", &enrollment.id, "progress", enrollment.progress, 0.0, 100.0)?;
        }

        for test in &self.tests {
            require_ref("test", &test.id, "course_id", &test.course_id, &course_ids)?;
        }

        for result in &self.test_results {
            require_ref("test result", &result.id, "student_id", &result.student_id, &student_ids)?;
            if !self.tests.is_empty() {
                require_ref("test result", &result.id, "test_id", &result.test_id, &test_ids)?;
            }
            require_range("test result", &result.id, "score", result.score, 0.0, 100.0)?;
        }

        Ok(())
    }
}

fn unique_ids<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId { collection, id: id.to_string() });
        }
    }
    Ok(seen)
}

fn require_ref(
    collection: &'static str,
    id: &str,
    field: &'static str,
    target: &str,
    known: &HashSet<&str>,
) -> Result<(), CatalogError> {
    if known.contains(target) {
        Ok(())
    } else {
        Err(CatalogError::MissingReference {
            collection,
            id: id.to_string(),
            field,
            target: target.to_string(),
        })
    }
}

fn require_range(
    collection: &'static str,
    id: &str,
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), CatalogError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CatalogError::OutOfRange { collection, id: id.to_string(), field, value })
    }
}
