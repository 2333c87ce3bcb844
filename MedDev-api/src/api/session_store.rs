//! In-memory store of visitor sessions
//!
//! Each visitor gets its own [`SessionContext`] behind a mutex. Removing the
//! entry on logout ends the session; the records fetch only holds a weak handle
//! and so cannot revive it.
//!
//! Sessions idle for longer than the idle timeout are expired, and the store
//! never holds more than its maximum size: inserting into a full store first
//! drops idle sessions, then the least recently used ones.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use std::time::Duration;

use axum::http::HeaderMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use meddev_domain::auth::context::SessionContext;
use meddev_domain::gate::FetchTicket;
use meddev_domain::services::PatientRecordsService;

/// Header carrying the session id returned by `POST /auth/login`
pub const SESSION_HEADER: &str = "x-session-id";

/// Default upper bound on live sessions
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Default time a session may stay untouched before it expires
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

pub type SharedSession = Arc<Mutex<SessionContext>>;

/// Session store errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session lock poisoned: {0}")]
    Lock(String),
}

impl<T> From<PoisonError<T>> for SessionStoreError {
    fn from(err: PoisonError<T>) -> Self {
        SessionStoreError::Lock(err.to_string())
    }
}

#[derive(Debug)]
struct SessionEntry {
    session: SharedSession,
    last_seen: Instant,
}

impl SessionEntry {
    fn is_idle(&self, now: Instant, idle_timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_seen) >= idle_timeout
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MAX_SESSIONS, DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding at most `max_sessions` (at least one) sessions
    pub fn with_limits(max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions: max_sessions.max(1),
            idle_timeout,
        }
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Register `ctx` under a fresh id, making room first if the store is full
    pub fn insert(&self, ctx: SessionContext) -> Result<(Uuid, SharedSession), SessionStoreError> {
        let id = Uuid::new_v4();
        let shared = Arc::new(Mutex::new(ctx));
        let now = Instant::now();

        let mut sessions = self.sessions.write()?;
        if sessions.len() >= self.max_sessions {
            warn!(
                "Session store reached max size ({}), expiring idle sessions",
                self.max_sessions
            );
            Self::remove_idle(&mut sessions, now, self.idle_timeout);

            if sessions.len() >= self.max_sessions {
                let excess = sessions.len() + 1 - self.max_sessions;
                Self::remove_least_recent(&mut sessions, excess);
            }
        }

        sessions.insert(
            id,
            SessionEntry {
                session: Arc::clone(&shared),
                last_seen: now,
            },
        );
        debug!("Session {} started", id);
        Ok((id, shared))
    }

    /// Look up a live session and mark it as used; idle sessions are expired
    pub fn get(&self, id: &Uuid) -> Result<Option<SharedSession>, SessionStoreError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write()?;

        match sessions.get_mut(id) {
            Some(entry) if !entry.is_idle(now, self.idle_timeout) => {
                entry.last_seen = now;
                return Ok(Some(Arc::clone(&entry.session)));
            }
            Some(_) => {}
            None => return Ok(None),
        }

        sessions.remove(id);
        debug!("Session {} expired", id);
        Ok(None)
    }

    /// Remove a session, returning it if it existed
    pub fn remove(&self, id: &Uuid) -> Result<Option<SharedSession>, SessionStoreError> {
        let removed = self.sessions.write()?.remove(id).map(|entry| entry.session);
        if removed.is_some() {
            debug!("Session {} ended", id);
        }
        Ok(removed)
    }

    /// Drop every session idle for longer than the idle timeout
    pub fn cleanup_idle_sessions(&self) -> Result<usize, SessionStoreError> {
        let mut sessions = self.sessions.write()?;
        Ok(Self::remove_idle(&mut sessions, Instant::now(), self.idle_timeout))
    }

    pub fn len(&self) -> Result<usize, SessionStoreError> {
        Ok(self.sessions.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, SessionStoreError> {
        Ok(self.len()? == 0)
    }

    fn remove_idle(sessions: &mut HashMap<Uuid, SessionEntry>, now: Instant, idle_timeout: Duration) -> usize {
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_idle(now, idle_timeout));
        let removed = before - sessions.len();
        if removed > 0 {
            debug!("Expired {} idle sessions", removed);
        }
        removed
    }

    fn remove_least_recent(sessions: &mut HashMap<Uuid, SessionEntry>, count: usize) {
        let mut by_age: Vec<(Uuid, Instant)> = sessions
            .iter()
            .map(|(id, entry)| (*id, entry.last_seen))
            .collect();
        by_age.sort_by_key(|(_, last_seen)| *last_seen);

        for (id, _) in by_age.into_iter().take(count) {
            sessions.remove(&id);
        }
        warn!("Evicted {} least recently used sessions", count);
    }
}

/// Periodically expire idle sessions
pub fn start_cleanup_task(store: SessionStore, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        loop {
            interval.tick().await;
            debug!("Running scheduled session cleanup");
            match store.cleanup_idle_sessions() {
                Ok(0) => {}
                Ok(removed) => info!("Session cleanup removed {} idle sessions", removed),
                Err(e) => error!("Session cleanup failed: {}", e),
            }
        }
    })
}

/// Session id from the request headers; absent or malformed ids yield `None`
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
}

/// Run the records fetch for `ticket` and hand the result to the session
///
/// The session is only upgraded once the fetch is done. If it has been
/// removed in the meantime the result is dropped.
pub fn spawn_records_fetch(
    service: Arc<PatientRecordsService>,
    session: Weak<Mutex<SessionContext>>,
    ticket: FetchTicket,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let result = service.fetch_patient_vitals(&mut rng).await;

        let Some(session) = session.upgrade() else {
            debug!("Session ended before patient records resolved");
            return;
        };

        match session.lock() {
            Ok(mut ctx) => {
                if !ctx.complete_records_fetch(ticket, result) {
                    debug!("Ignored patient records for a previous login");
                }
            }
            Err(e) => error!("Could not store patient records: {}", e),
        };
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::NaiveDate;
    use meddev_domain::auth::Role;
    use meddev_domain::gate::GateState;
    use meddev_domain::testing::immediate_records_service;

    fn service() -> Arc<PatientRecordsService> {
        Arc::new(immediate_records_service(NaiveDate::from_ymd_opt(2025, 7, 22).unwrap()))
    }

    #[test]
    fn test_insert_get_remove() {
        let store = SessionStore::new();
        assert!(store.is_empty().unwrap());

        let (id, _) = store.insert(SessionContext::new()).unwrap();
        assert!(store.get(&id).unwrap().is_some());
        assert_eq!(store.len().unwrap(), 1);

        assert!(store.remove(&id).unwrap().is_some());
        assert!(store.get(&id).unwrap().is_none());
        assert!(store.remove(&id).unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_store_evicts_least_recently_used() {
        let store = SessionStore::with_limits(3, Duration::from_secs(3600));
        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(store.insert(SessionContext::new()).unwrap().0);
            time::advance(Duration::from_secs(1)).await;
        }

        // touching the oldest session makes the second one the eviction candidate
        assert!(store.get(&ids[0]).unwrap().is_some());
        time::advance(Duration::from_secs(1)).await;

        let (newest, _) = store.insert(SessionContext::new()).unwrap();
        assert_eq!(store.len().unwrap(), 3);
        assert!(store.get(&ids[1]).unwrap().is_none());
        assert!(store.get(&ids[0]).unwrap().is_some());
        assert!(store.get(&ids[2]).unwrap().is_some());
        assert!(store.get(&newest).unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overfilled_store_stays_at_max_size() {
        let store = SessionStore::with_limits(50, Duration::from_secs(3600));
        for _ in 0..500 {
            store.insert(SessionContext::new()).unwrap();
            time::advance(Duration::from_millis(1)).await;
        }
        assert_eq!(store.len().unwrap(), 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_store_prefers_expiring_idle_sessions() {
        let store = SessionStore::with_limits(2, Duration::from_secs(60));
        let (idle, _) = store.insert(SessionContext::new()).unwrap();
        time::advance(Duration::from_secs(45)).await;
        let (active, _) = store.insert(SessionContext::new()).unwrap();
        time::advance(Duration::from_secs(30)).await;

        store.insert(SessionContext::new()).unwrap();
        assert_eq!(store.len().unwrap(), 2);
        assert!(store.get(&idle).unwrap().is_none());
        assert!(store.get(&active).unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_expires_on_lookup() {
        let store = SessionStore::with_limits(10, Duration::from_secs(60));
        let (id, _) = store.insert(SessionContext::new()).unwrap();

        time::advance(Duration::from_secs(30)).await;
        assert!(store.get(&id).unwrap().is_some());

        time::advance(Duration::from_secs(61)).await;
        assert!(store.get(&id).unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_task_expires_idle_sessions() {
        let store = SessionStore::with_limits(10, Duration::from_secs(60));
        for _ in 0..4 {
            store.insert(SessionContext::new()).unwrap();
        }

        let task = start_cleanup_task(store.clone(), Duration::from_secs(30));
        time::sleep(Duration::from_secs(95)).await;

        assert!(store.is_empty().unwrap());
        task.abort();
    }

    #[test]
    fn test_session_id_header() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        assert_eq!(session_id(&headers), None);

        headers.insert(SESSION_HEADER, HeaderValue::from_static("not-a-uuid"));
        assert_eq!(session_id(&headers), None);

        headers.insert(SESSION_HEADER, HeaderValue::from_str(&id.to_string()).unwrap());
        assert_eq!(session_id(&headers), Some(id));
    }

    #[tokio::test]
    async fn test_fetch_resolves_live_session() {
        let store = SessionStore::new();
        let mut ctx = SessionContext::new();
        let ticket = ctx.login_as(Role::Admin).unwrap();
        let (_, shared) = store.insert(ctx).unwrap();

        spawn_records_fetch(service(), Arc::downgrade(&shared), ticket)
            .await
            .unwrap();

        let ctx = shared.lock().unwrap();
        assert_eq!(ctx.patient_records().records().map(|r| r.len()), Some(2));
    }

    #[tokio::test]
    async fn test_fetch_after_session_removed_is_dropped() {
        let store = SessionStore::new();
        let mut ctx = SessionContext::new();
        let ticket = ctx.login_as(Role::Doctor).unwrap();
        let (id, shared) = store.insert(ctx).unwrap();
        let weak = Arc::downgrade(&shared);

        store.remove(&id).unwrap();
        drop(shared);

        spawn_records_fetch(service(), weak.clone(), ticket).await.unwrap();
        assert!(weak.upgrade().is_none());
    }

    #[tokio::test]
    async fn test_fetch_for_previous_login_is_ignored() {
        let mut ctx = SessionContext::new();
        let stale = ctx.login_as(Role::Doctor).unwrap();
        ctx.login_as(Role::Nurse);
        let shared = Arc::new(Mutex::new(ctx));

        spawn_records_fetch(service(), Arc::downgrade(&shared), stale)
            .await
            .unwrap();

        let ctx = shared.lock().unwrap();
        assert_eq!(
            ctx.patient_records().state(),
            &GateState::AuthenticatedInsufficientRole
        );
    }
}
