use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::AuthenticatedSession;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::course::{CourseCard, CourseDetailResponse, CourseListResponse, ViewQuery};
use crate::services::course_filter::CourseFilter;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_courses)).route("/:course_id", get(get_course))
}

async fn list_courses(
    State(state): State<AppState>,
    session: AuthenticatedSession,
    Query(query): Query<ViewQuery>,
) -> Result<Json<CourseListResponse>, ApiError> {
    query.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let filter = CourseFilter::from_query(
        query.search.as_deref(),
        query.category.as_deref(),
        query.level.as_deref(),
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let courses: Vec<CourseCard> = filter
        .apply(repositories::courses::list(state.catalog()))
        .into_iter()
        .map(CourseCard::from_course)
        .collect();

    tracing::debug!(
        session_id = %session.id,
        role = session.role.as_str(),
        matched = courses.len(),
        "Course catalog listed"
    );

    Ok(Json(CourseListResponse { total: courses.len(), courses }))
}

async fn get_course(
    State(state): State<AppState>,
    _session: AuthenticatedSession,
    Path(course_id): Path<String>,
) -> Result<Json<CourseDetailResponse>, ApiError> {
    let course = repositories::courses::find_by_id(state.catalog(), &course_id)
        .ok_or_else(|| ApiError::NotFound(format!("Course {course_id} not found")))?;

    Ok(Json(CourseDetailResponse::from_course(course)))
}
