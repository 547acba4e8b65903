//! Read-only lookups over the loaded catalog.

pub(crate) mod courses;
pub(crate) mod enrollments;
pub(crate) mod test_results;
pub(crate) mod users;
