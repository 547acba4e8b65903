pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod repositories;
pub(crate) mod schemas;
pub(crate) mod services;
pub(crate) mod tasks;

#[cfg(test)]
mod test_support;

use std::path::Path;

use tokio::sync::watch;

use crate::core::{config::Settings, sessions::SessionStore, state::AppState, telemetry};

/// Record counts of a loaded and validated catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub credentials: usize,
    pub students: usize,
    pub instructors: usize,
    pub admins: usize,
    pub courses: usize,
    pub lessons: usize,
    pub enrollments: usize,
    pub tests: usize,
    pub test_results: usize,
}

/// Loads the catalog at `path`, or the bundled one when `path` is `None`,
/// and checks its invariants.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<CatalogSummary> {
    let catalog = match path {
        Some(path) => db::load_file(path)?,
        None => db::embedded()?,
    };

    Ok(CatalogSummary {
        credentials: catalog.credentials.len(),
        students: catalog.students.len(),
        instructors: catalog.instructors.len(),
        admins: catalog.admins.len(),
        courses: catalog.courses.len(),
        lessons: catalog.courses.iter().map(|course| course.lesson_count()).sum(),
        enrollments: catalog.enrollments.len(),
        tests: catalog.tests.len(),
        test_results: catalog.test_results.len(),
    })
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(settings.telemetry())?;
    core::metrics::init(&settings)?;

    if settings.security().secret_key_generated {
        tracing::warn!("SECRET_KEY not set; using a generated key, issued tokens stop verifying after a restart");
    }

    let catalog = db::load(&settings)?;
    tracing::info!(
        courses = catalog.courses.len(),
        enrollments = catalog.enrollments.len(),
        source = settings
            .catalog()
            .path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        "Catalog loaded"
    );

    let sessions = SessionStore::new();
    let state = AppState::new(settings, catalog, sessions.clone());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let session_settings = state.settings().session();
    let sweeper = tokio::spawn(tasks::session_sweeper::run(
        sessions,
        time::Duration::minutes(session_settings.idle_minutes as i64),
        std::time::Duration::from_secs(session_settings.sweep_seconds),
        shutdown_rx,
    ));

    let app = api::router::router(state.clone());
    let listener = tokio::net::TcpListener::bind(state.settings().server_addr()).await?;

    tracing::info!(
        host = %state.settings().server_host(),
        port = state.settings().server_port(),
        environment = %state.settings().runtime().environment.as_str(),
        "Skill4Edge API listening"
    );

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(core::shutdown::shutdown_signal(shutdown_tx))
        .await;

    if let Err(err) = sweeper.await {
        tracing::error!(error = %err, "Session sweeper join failed");
    }

    result?;

    Ok(())
}
