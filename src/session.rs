use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::services::generator_service::QrArtifact;

/// If a subscriber falls this far behind it starts losing events; the UI
/// recovers by re-fetching state on the next one.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// What changed for a session. The presentation layer subscribes and
/// re-renders on these instead of being re-executed wholesale.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactEvent {
    pub session_id: Uuid,
    pub kind: ArtifactEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactEventKind {
    Generated,
    Hosted,
    Cleared,
}

impl ArtifactEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactEventKind::Generated => "generated",
            ArtifactEventKind::Hosted => "hosted",
            ArtifactEventKind::Cleared => "cleared",
        }
    }
}

struct StoredArtifact {
    artifact: QrArtifact,
    revision: u64,
}

/// Session-scoped artifact storage owned by the API layer. Artifacts are
/// replaced wholesale on each generation and removed on clear. Revisions
/// are monotonic across the store's lifetime, so a hosted URL can never
/// attach to bytes it was not uploaded from, even across a clear.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, StoredArtifact>>,
    next_revision: AtomicU64,
    events: broadcast::Sender<ArtifactEvent>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_revision: AtomicU64::new(0),
            events,
        }
    }

    /// Store a fresh artifact for the session, replacing whatever was
    /// there. Returns the revision token `attach_hosted_url` expects.
    pub async fn insert(&self, session_id: Uuid, artifact: QrArtifact) -> u64 {
        let revision = self.next_revision.fetch_add(1, Ordering::Relaxed) + 1;
        {
            let mut sessions = self.sessions.write().await;
            sessions.insert(session_id, StoredArtifact { artifact, revision });
        }
        self.emit(session_id, ArtifactEventKind::Generated);
        revision
    }

    /// Current artifact plus its revision token, if any.
    pub async fn snapshot(&self, session_id: Uuid) -> Option<(u64, QrArtifact)> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&session_id)
            .map(|stored| (stored.revision, stored.artifact.clone()))
    }

    /// Attach a hosted URL to the artifact the upload was made from.
    /// Refuses when the artifact was replaced or cleared in the meantime.
    pub async fn attach_hosted_url(
        &self,
        session_id: Uuid,
        revision: u64,
        hosted_url: String,
    ) -> bool {
        let attached = {
            let mut sessions = self.sessions.write().await;
            match sessions.get_mut(&session_id) {
                Some(stored) if stored.revision == revision => {
                    stored.artifact.hosted_url = Some(hosted_url);
                    true
                }
                _ => false,
            }
        };

        if attached {
            self.emit(session_id, ArtifactEventKind::Hosted);
        }
        attached
    }

    /// Drop the session's artifact. Idempotent; the event fires even when
    /// nothing was stored so the UI converges to "no artifact" either way.
    pub async fn clear(&self, session_id: Uuid) -> bool {
        let existed = {
            let mut sessions = self.sessions.write().await;
            sessions.remove(&session_id).is_some()
        };
        self.emit(session_id, ArtifactEventKind::Cleared);
        existed
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ArtifactEvent> {
        self.events.subscribe()
    }

    fn emit(&self, session_id: Uuid, kind: ArtifactEventKind) {
        // send only errors when nobody is subscribed, which is fine
        let _ = self.events.send(ArtifactEvent { session_id, kind });
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
