use thiserror::Error;

use crate::db::models::Course;
use crate::db::types::CourseLevel;

pub(crate) const ALL: &str = "All";

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum FilterError {
    #[error("unknown course level: {0}")]
    UnknownLevel(String),
}

/// Catalog filter. `None` on a field means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CourseFilter {
    search: Option<String>,
    category: Option<String>,
    level: Option<CourseLevel>,
}

impl CourseFilter {
    pub(crate) fn from_query(
        search: Option<&str>,
        category: Option<&str>,
        level: Option<&str>,
    ) -> Result<Self, FilterError> {
        let search = search.filter(|s| !s.is_empty()).map(str::to_lowercase);
        let category = category
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL))
            .map(str::to_string);
        let level = match level.filter(|l| !l.is_empty()) {
            None => None,
            Some(value) if value.eq_ignore_ascii_case(ALL) => None,
            Some(value) => Some(
                CourseLevel::parse(value)
                    .ok_or_else(|| FilterError::UnknownLevel(value.to_string()))?,
            ),
        };

        Ok(Self { search, category, level })
    }

    pub(crate) fn matches(&self, course: &Course) -> bool {
        let search_ok = self.search.as_deref().map_or(true, |needle| {
            course.title.to_lowercase().contains(needle)
                || course.description.to_lowercase().contains(needle)
        });
        let category_ok = self.category.as_deref().map_or(true, |c| course.category == c);
        let level_ok = self.level.map_or(true, |l| course.level == l);

        search_ok && category_ok && level_ok
    }

    pub(crate) fn apply<'a>(&self, courses: &'a [Course]) -> Vec<&'a Course> {
        courses.iter().filter(|course| self.matches(course)).collect()
    }

    pub(crate) fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL)
    }

    pub(crate) fn level_label(&self) -> &'static str {
        self.level.map_or(ALL, CourseLevel::as_str)
    }

    pub(crate) fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

/// `All` followed by each distinct category in catalog order.
pub(crate) fn categories(courses: &[Course]) -> Vec<String> {
    let mut out = vec![ALL.to_string()];
    for course in courses {
        if !out.iter().any(|c| c == &course.category) {
            out.push(course.category.clone());
        }
    }
    out
}

pub(crate) fn levels() -> Vec<&'static str> {
    std::iter::once(ALL).chain(CourseLevel::ALL.iter().map(|l| l.as_str())).collect()
}
