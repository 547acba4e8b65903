//! In-memory session store. One entry per visitor, keyed by the session id
//! carried in the bearer token.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::services::session::{SessionEvent, SessionState, Submit, TransitionError};

#[derive(Debug, Clone)]
struct SessionEntry {
    state: SessionState,
    created_at: OffsetDateTime,
    last_seen: OffsetDateTime,
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("session not found")]
    NotFound,
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
}

impl SessionStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn create(&self) -> (Uuid, SessionState) {
        let id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();
        let state = SessionState::initial();

        self.inner
            .write()
            .await
            .insert(id, SessionEntry { state: state.clone(), created_at: now, last_seen: now });

        (id, state)
    }

    /// Returns the current state and marks the session as seen.
    pub(crate) async fn get(&self, id: Uuid) -> Result<SessionState, StoreError> {
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(&id).ok_or(StoreError::NotFound)?;
        entry.last_seen = OffsetDateTime::now_utc();
        Ok(entry.state.clone())
    }

    /// Applies `event` under the write lock. On a rejected transition the
    /// stored state is left as it was.
    pub(crate) async fn apply(
        &self,
        id: Uuid,
        event: SessionEvent,
    ) -> Result<SessionState, StoreError> {
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(&id).ok_or(StoreError::NotFound)?;
        entry.last_seen = OffsetDateTime::now_utc();

        let next = entry.state.apply(event)?;
        entry.state = next.clone();
        Ok(next)
    }

    /// Marks the session as seen and checks `submit` may start from its
    /// current state. The state itself is not changed.
    pub(crate) async fn begin_submit(&self, id: Uuid, submit: Submit) -> Result<(), StoreError> {
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(&id).ok_or(StoreError::NotFound)?;
        entry.last_seen = OffsetDateTime::now_utc();
        entry.state.begin_submit(submit)?;
        Ok(())
    }

    pub(crate) async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    /// Drops sessions not seen for `idle`. Returns how many were removed.
    pub(crate) async fn expire_idle(&self, idle: Duration) -> usize {
        let cutoff = OffsetDateTime::now_utc() - idle;
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen >= cutoff);
        before - sessions.len()
    }

    pub(crate) async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub(crate) async fn created_at(&self, id: Uuid) -> Option<OffsetDateTime> {
        self.inner.read().await.get(&id).map(|entry| entry.created_at)
    }
}
