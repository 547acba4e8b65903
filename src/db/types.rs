use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum UserRole {
    Student,
    Instructor,
    Admin,
}

impl UserRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Instructor => "instructor",
            UserRole::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub(crate) const ALL: [CourseLevel; 3] =
        [CourseLevel::Beginner, CourseLevel::Intermediate, CourseLevel::Advanced];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            CourseLevel::Beginner => "Beginner",
            CourseLevel::Intermediate => "Intermediate",
            CourseLevel::Advanced => "Advanced",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum EnrollmentStatus {
    Active,
    Completed,
    Paused,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_level_parse_is_case_insensitive() {
        assert_eq!(CourseLevel::parse("beginner"), Some(CourseLevel::Beginner));
        assert_eq!(CourseLevel::parse("Advanced"), Some(CourseLevel::Advanced));
        assert_eq!(CourseLevel::parse(" Advanced "), None);
        assert_eq!(CourseLevel::parse("All"), None);
    }

    #[test]
    fn user_role_serializes_lowercase() {
        let json = serde_json::to_string(&UserRole::Instructor).unwrap();
        assert_eq!(json, "\"instructor\"");
        let parsed: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, UserRole::Admin);
    }
}
