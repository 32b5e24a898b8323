use crate::error::ApiError;
use crate::models::{DrawingSession, DrawingSummary, SessionId, StrokeEvent};
use async_trait::async_trait;
use ink_raster::StrokeSet;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Storage for live drawing sessions
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Open a new, empty session
    async fn create(&self) -> SessionId;

    /// Apply pointer events in order and return the resulting summary
    async fn apply(&self, id: &SessionId, events: &[StrokeEvent])
        -> Result<DrawingSummary, ApiError>;

    /// Discard every stroke in the session
    async fn clear(&self, id: &SessionId) -> Result<DrawingSummary, ApiError>;

    /// Copy of the committed strokes
    async fn snapshot(&self, id: &SessionId) -> Result<StrokeSet, ApiError>;

    /// Close the session
    async fn remove(&self, id: &SessionId) -> Result<(), ApiError>;
}

struct Entry {
    session: DrawingSession,
    last_used: Instant,
}

/// In-memory session storage with least-recently-used eviction
pub struct InMemorySessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, Entry>>>,
    canvas_size: f32,
    max_sessions: usize,
}

impl InMemorySessionRegistry {
    pub fn new(canvas_size: u32, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            canvas_size: canvas_size as f32,
            max_sessions: max_sessions.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    async fn with_session<T, F>(&self, id: &SessionId, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut DrawingSession) -> T + Send,
        T: Send,
    {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(id).ok_or(ApiError::SessionNotFound)?;
        entry.last_used = Instant::now();
        Ok(f(&mut entry.session))
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn create(&self) -> SessionId {
        let mut sessions = self.sessions.write().await;

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| *id);
            match oldest {
                Some(oldest) => {
                    sessions.remove(&oldest);
                    tracing::debug!(session = %oldest, "Evicted least recently used session");
                }
                None => break,
            }
        }

        let id = SessionId::new();
        sessions.insert(
            id,
            Entry {
                session: DrawingSession::new(self.canvas_size),
                last_used: Instant::now(),
            },
        );
        tracing::debug!(session = %id, active = sessions.len(), "Created drawing session");
        id
    }

    async fn apply(
        &self,
        id: &SessionId,
        events: &[StrokeEvent],
    ) -> Result<DrawingSummary, ApiError> {
        self.with_session(id, |session| {
            for event in events {
                session.apply(*event);
            }
            session.take_summary()
        })
        .await
    }

    async fn clear(&self, id: &SessionId) -> Result<DrawingSummary, ApiError> {
        self.with_session(id, |session| {
            session.reset();
            session.take_summary()
        })
        .await
    }

    async fn snapshot(&self, id: &SessionId) -> Result<StrokeSet, ApiError> {
        self.with_session(id, |session| session.snapshot()).await
    }

    async fn remove(&self, id: &SessionId) -> Result<(), ApiError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(id)
            .map(|_| ())
            .ok_or(ApiError::SessionNotFound)
    }
}
