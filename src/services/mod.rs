pub(crate) mod analytics;
pub(crate) mod course_filter;
pub(crate) mod credentials;
pub(crate) mod dashboards;
pub(crate) mod navigation;
pub(crate) mod registration;
pub(crate) mod session;
