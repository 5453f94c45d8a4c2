use kulture_core::{RegionAggregator, Session};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::config::SessionLimits;

/// One browsing session; actions on it are applied one at a time
pub type SharedSession = Arc<Mutex<Session>>;

struct SessionEntry {
    session: SharedSession,
    last_access: Instant,
}

impl SessionEntry {
    fn is_idle(&self, limits: &SessionLimits, now: Instant) -> bool {
        now.saturating_duration_since(self.last_access) > limits.idle_timeout
    }
}

pub struct AppState {
    pub aggregator: Arc<RegionAggregator>,
    limits: SessionLimits,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl AppState {
    pub fn new(aggregator: Arc<RegionAggregator>) -> Self {
        Self::with_limits(aggregator, SessionLimits::default())
    }

    pub fn with_limits(aggregator: Arc<RegionAggregator>, limits: SessionLimits) -> Self {
        Self {
            aggregator,
            limits,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start a session on the home screen. Idle sessions are evicted first;
    /// `None` means the registry is still full afterwards.
    pub async fn create_session(&self) -> Option<(Uuid, SharedSession)> {
        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions);

        if sessions.len() >= self.limits.max_sessions {
            tracing::warn!(max = self.limits.max_sessions, "Session registry full");
            return None;
        }

        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new(self.aggregator.clone())));
        sessions.insert(
            id,
            SessionEntry {
                session: session.clone(),
                last_access: Instant::now(),
            },
        );
        Some((id, session))
    }

    /// Look up a live session and mark it as used. An idle one is removed.
    pub async fn session(&self, id: Uuid) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();

        let entry = sessions.get_mut(&id)?;
        if entry.is_idle(&self.limits, now) {
            sessions.remove(&id);
            tracing::info!(session_id = %id, "Expired idle session");
            return None;
        }

        entry.last_access = now;
        Some(entry.session.clone())
    }

    /// Returns false when no session had this id
    pub async fn remove_session(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, SessionEntry>) {
        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_idle(&self.limits, now));

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, "Evicted idle sessions");
        }
    }
}
