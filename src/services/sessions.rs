//! Session registry shared by editors and viewers
//!
//! Every lookup refreshes a session's last use; [`SessionRegistry::sweep_idle`]
//! drops the ones the view layer abandoned without closing them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

struct Entry<T> {
    session: Arc<T>,
    last_used: Instant,
}

/// Sessions keyed by a random id handed to the view layer
pub struct SessionRegistry<T> {
    sessions: RwLock<HashMap<Uuid, Entry<T>>>,
}

impl<T> Default for SessionRegistry<T> {
    fn default() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> SessionRegistry<T> {
    pub async fn insert(&self, session: T) -> (Uuid, Arc<T>) {
        let id = Uuid::new_v4();
        let session = Arc::new(session);
        let entry = Entry {
            session: Arc::clone(&session),
            last_used: Instant::now(),
        };
        self.sessions.write().await.insert(id, entry);
        (id, session)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Arc<T>> {
        self.get_at(id, Instant::now()).await
    }

    async fn get_at(&self, id: Uuid, now: Instant) -> AppResult<Arc<T>> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        entry.last_used = now;
        Ok(Arc::clone(&entry.session))
    }

    pub async fn remove(&self, id: Uuid) -> AppResult<Arc<T>> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|entry| entry.session)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Drop sessions unused for longer than `max_idle` as of `now`
    ///
    /// Returns how many were removed. Dropping a viewer handle closes its
    /// channel, which ends the viewer task.
    pub async fn sweep_idle(&self, now: Instant, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.saturating_duration_since(entry.last_used) <= max_idle);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let registry = SessionRegistry::default();
        let (id, _) = registry.insert("editor").await;

        assert_eq!(*registry.get(id).await.unwrap(), "editor");
        registry.remove(id).await.unwrap();

        assert!(registry.is_empty().await);
        assert!(matches!(registry.get(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(registry.remove(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_sweep_removes_only_idle_sessions() {
        let registry = SessionRegistry::default();
        let (abandoned, _) = registry.insert("abandoned").await;
        let (active, _) = registry.insert("active").await;
        let max_idle = Duration::from_secs(60);

        assert_eq!(registry.sweep_idle(Instant::now(), max_idle).await, 0);

        // A lookup refreshes the session
        let later = Instant::now() + Duration::from_secs(61);
        registry.get_at(active, later).await.unwrap();

        assert_eq!(registry.sweep_idle(later, max_idle).await, 1);
        assert!(matches!(registry.get(abandoned).await, Err(AppError::NotFound(_))));
        assert_eq!(*registry.get(active).await.unwrap(), "active");
    }
}
