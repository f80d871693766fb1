//! Concurrent registry of live game sessions.
//!
//! The map lock is held only long enough to find, insert or remove a slot.
//! Each session sits behind its own mutex, so operations on one session are
//! serialized while different sessions proceed in parallel.

use crate::error::ServiceError;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, TryLockError};
use std::time::{Duration, Instant};
use strictly_baseball::{GameStatus, RandomSecrets, SecretSource, Session, SessionId};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

#[derive(Debug)]
struct Slot {
    session: Session,
    last_access: Instant,
    evicted: bool,
}

type SlotHandle = Arc<Mutex<Slot>>;

fn lock(slot: &SlotHandle) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One line of the session listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct SessionSummary {
    /// Session id.
    session_id: SessionId,
    /// Current status.
    status: GameStatus,
    /// Attempts made so far.
    attempt_count: usize,
}

/// Manages all game sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SlotHandle>>>,
    secrets: Arc<dyn SecretSource>,
}

impl SessionStore {
    /// Creates an empty store that draws random secrets.
    #[instrument]
    pub fn new() -> Self {
        Self::with_secret_source(Arc::new(RandomSecrets))
    }

    /// Creates an empty store with a custom secret source.
    #[instrument(skip(secrets))]
    pub fn with_secret_source(secrets: Arc<dyn SecretSource>) -> Self {
        info!("Creating session store");
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            secrets,
        }
    }

    /// Creates a session with a fresh secret and returns its id.
    #[instrument(skip(self))]
    pub fn create(&self) -> SessionId {
        let secret = self.secrets.next_secret();
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let id = loop {
            let candidate = SessionId::new(Uuid::new_v4().to_string());
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
            warn!(session_id = %candidate, "Session id collision, retrying");
        };

        let slot = Slot {
            session: Session::new(id.clone(), secret),
            last_access: Instant::now(),
            evicted: false,
        };
        sessions.insert(id.clone(), Arc::new(Mutex::new(slot)));

        info!(session_id = %id, active = sessions.len(), "Created new session");
        id
    }

    fn slot(&self, id: &str) -> Result<SlotHandle, ServiceError> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions.get(id).cloned().ok_or_else(|| {
            debug!(session_id = id, "Session not found");
            ServiceError::SessionNotFound(SessionId::new(id))
        })
    }

    /// Runs `f` against one session while holding that session's lock.
    ///
    /// Refreshes the session's last-access time. A session evicted while the
    /// caller waited for the lock reports `SessionNotFound`.
    #[instrument(skip(self, f))]
    pub fn with_session<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, ServiceError> {
        let slot = self.slot(id)?;
        let mut guard = lock(&slot);
        if guard.evicted {
            debug!(session_id = id, "Session was evicted while waiting");
            return Err(ServiceError::SessionNotFound(SessionId::new(id)));
        }
        guard.last_access = Instant::now();
        Ok(f(&mut guard.session))
    }

    /// Removes a session explicitly.
    #[instrument(skip(self))]
    pub fn discard(&self, id: &str) -> Result<(), ServiceError> {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);

        match removed {
            Some(slot) => {
                // Waits for any in-flight mutation to finish first.
                lock(&slot).evicted = true;
                info!(session_id = id, "Discarded session");
                Ok(())
            }
            None => {
                debug!(session_id = id, "Discard of unknown session");
                Err(ServiceError::SessionNotFound(SessionId::new(id)))
            }
        }
    }

    /// Lists all active sessions.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<SessionSummary> {
        let slots: Vec<SlotHandle> = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        let mut summaries: Vec<SessionSummary> = slots
            .iter()
            .map(|slot| {
                let guard = lock(slot);
                SessionSummary::new(
                    guard.session.id().clone(),
                    guard.session.status(),
                    guard.session.attempt_count(),
                )
            })
            .collect();
        summaries.sort_by(|a, b| a.session_id.cmp(&b.session_id));

        debug!(count = summaries.len(), "Listed sessions");
        summaries
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when no sessions are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes sessions idle for at least `ttl`.
    ///
    /// Sessions whose lock is held right now are skipped, so an in-flight
    /// mutation is never cut short. Returns the number evicted.
    #[instrument(skip(self))]
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();

        sessions.retain(|id, slot| {
            let mut guard = match slot.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => return true,
            };
            if now.duration_since(guard.last_access) >= ttl {
                guard.evicted = true;
                debug!(session_id = %id, status = %guard.session.status(), "Evicting idle session");
                false
            } else {
                true
            }
        });

        before - sessions.len()
    }

    /// Runs [`evict_idle`](Self::evict_idle) every `interval` on the tokio runtime.
    #[instrument(skip(self))]
    pub fn spawn_sweeper(&self, interval: Duration, ttl: Duration) -> JoinHandle<()> {
        let store = self.clone();
        info!(?interval, ?ttl, "Starting idle session sweeper");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(ttl);
                if evicted > 0 {
                    info!(evicted, active = store.len(), "Evicted idle sessions");
                }
            }
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
