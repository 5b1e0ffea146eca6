//! Session registry.
//!
//! Owns every live session. Constructed once at startup and shared through
//! `AppState`. The registry lock guards only the id map: it is released
//! before any session method runs, and no session lock is ever taken while
//! it is held.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::entropy::{OsRandom, RandomSource};
use super::id_gen::{generate_id, SESSION_ID_LEN};
use super::session::{now_unix, Session};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// Fresh ids tried before giving up on a create.
const MAX_ID_ATTEMPTS: usize = 8;

pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Arc<Session>>>,
    rng: Arc<dyn RandomSource>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    /// Registry drawing from OS entropy.
    pub fn new() -> Self {
        Self::with_random_source(Arc::new(OsRandom))
    }

    /// Registry whose ids and sessions draw from `rng`.
    pub fn with_random_source(rng: Arc<dyn RandomSource>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            rng,
        }
    }

    /// Create an empty session owned by `owner` with default difficulty.
    pub fn create(&self, owner: &str) -> Result<Arc<Session>, DomainError> {
        self.create_with_difficulty(owner, 0)
    }

    /// Create an empty session owned by `owner`.
    ///
    /// Ids are drawn outside the lock; an id already in use is redrawn.
    /// An entropy failure aborts before anything is registered.
    pub fn create_with_difficulty(
        &self,
        owner: &str,
        difficulty: i32,
    ) -> Result<Arc<Session>, DomainError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = generate_id(SESSION_ID_LEN, self.rng.as_ref())?;

            let mut sessions = self.sessions.lock();
            if sessions.contains_key(&id) {
                debug!(session_id = %id, "session id collision, redrawing");
                continue;
            }
            let session = Arc::new(Session::new(
                id.clone(),
                owner,
                difficulty,
                Arc::clone(&self.rng),
            ));
            sessions.insert(id.clone(), Arc::clone(&session));
            drop(sessions);

            info!(session_id = %id, owner = %owner, difficulty, "session created");
            return Ok(session);
        }

        Err(DomainError::conflict(
            ConflictKind::SessionIdExhausted,
            format!("no free session id after {MAX_ID_ATTEMPTS} attempts"),
        ))
    }

    pub fn find_by_id(&self, id: &str) -> Result<Arc<Session>, DomainError> {
        self.sessions.lock().get(id).cloned().ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Session, format!("session '{id}' not found"))
        })
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop sessions idle for longer than `max_idle` and mark them closed.
    /// Returns how many were removed.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        self.evict_idle_at(now_unix(), max_idle)
    }

    pub(crate) fn evict_idle_at(&self, now: i64, max_idle: Duration) -> usize {
        let cutoff = now.saturating_sub(i64::try_from(max_idle.as_secs()).unwrap_or(i64::MAX));
        let mut sessions = self.sessions.lock();
        let stale: Vec<String> = sessions
            .iter()
            .filter(|(_, s)| s.last_active() < cutoff)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &stale {
            if let Some(session) = sessions.remove(id) {
                // Handlers still holding the Arc see the session as gone.
                session.close();
            }
        }
        drop(sessions);
        let evicted = stale.len();

        if evicted > 0 {
            info!(evicted, "idle sessions evicted");
        }
        evicted
    }
}
