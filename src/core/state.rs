use std::sync::Arc;

use crate::core::{config::Settings, sessions::SessionStore};
use crate::db::Catalog;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    catalog: Arc<Catalog>,
    sessions: SessionStore,
}

impl AppState {
    pub(crate) fn new(settings: Settings, catalog: Catalog, sessions: SessionStore) -> Self {
        Self { inner: Arc::new(InnerState { settings, catalog: Arc::new(catalog), sessions }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    pub(crate) fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }
}
