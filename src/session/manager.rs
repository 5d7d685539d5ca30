//! Shared session lifecycle manager.
//!
//! # Responsibilities
//! - Own the single pooled HTTP client shared by all request handlers
//! - Construct it lazily on first acquire, exactly once under races
//! - Tear it down exactly once at shutdown, best-effort
//!
//! # Design Decisions
//! - The manager is an explicitly owned handle threaded through app state,
//!   not a process global; tests build private managers freely
//! - One async mutex guards the slot: construction and teardown are mutually
//!   exclusive, and racing first acquires collapse into one construction
//! - Teardown never propagates errors; the slot is cleared regardless

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::SessionConfig;
use crate::observability::metrics;

/// Errors from session lifecycle operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The underlying client could not be constructed. Fatal to startup when
    /// raised by the eager acquire; the slot stays empty so a retry may
    /// succeed later.
    #[error("failed to initialize shared session: {0}")]
    Initialization(String),

    /// Teardown did not complete cleanly. Logged by `release`, never
    /// propagated.
    #[error("failed to release shared session: {0}")]
    Teardown(String),
}

/// A handle to the process-wide outbound client.
///
/// Clones are cheap and share one connection pool. Handlers hold a clone for
/// the duration of a single outbound call; they must not tear it down.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    http: reqwest::Client,
    generation: u64,
}

impl SharedSession {
    fn connect(config: &SessionConfig, generation: u64) -> Result<Self, SessionError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            SessionError::Initialization(format!(
                "invalid user agent {:?}: {e}",
                config.user_agent
            ))
        })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(|e| SessionError::Initialization(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(SessionInner { http, generation }),
        })
    }

    /// The pooled HTTP client backing this session.
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Instance number, bumped on every fresh construction. Two sessions with
    /// different generations are genuinely different clients.
    pub fn generation(&self) -> u64 {
        self.inner.generation
    }

    /// Drop this handle, reporting whether the pool actually closed.
    ///
    /// Pooled connections are released when the last handle drops. Stragglers
    /// mid-call keep their clone alive until the call finishes; that is
    /// reported as a teardown error so `release` can log it.
    fn close(self) -> Result<(), SessionError> {
        let refs = Arc::strong_count(&self.inner);
        drop(self);
        if refs > 1 {
            return Err(SessionError::Teardown(format!(
                "{} in-flight reference(s) still hold the pool open",
                refs - 1
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SharedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSession")
            .field("generation", &self.inner.generation)
            .finish()
    }
}

/// Owns the process-wide shared session.
///
/// Two states: absent or present. `acquire` moves absent → present,
/// `release` moves present → absent. Both tolerate repeated and out-of-order
/// calls.
pub struct SessionManager {
    config: SessionConfig,
    slot: Mutex<Option<SharedSession>>,
    generation: AtomicU64,
}

impl SessionManager {
    /// Create a manager in the absent state. No client is constructed yet.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            slot: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Return the shared session, constructing it if absent.
    ///
    /// Idempotent: repeated calls before `release` return the same instance.
    /// Racing first callers serialize on the slot mutex, so exactly one
    /// construction wins and every caller observes it.
    pub async fn acquire(&self) -> Result<SharedSession, SessionError> {
        let mut slot = self.slot.lock().await;
        if let Some(session) = slot.as_ref() {
            return Ok(session.clone());
        }

        let generation = self.generation.load(Ordering::Relaxed) + 1;
        let session = SharedSession::connect(&self.config, generation)?;
        self.generation.store(generation, Ordering::Relaxed);
        *slot = Some(session.clone());

        tracing::info!(
            generation,
            request_timeout_secs = self.config.request_timeout_secs,
            user_agent = %self.config.user_agent,
            "Shared session constructed"
        );
        metrics::record_session_event("construct");

        Ok(session)
    }

    /// Tear down the shared session if present.
    ///
    /// The slot is cleared before teardown runs, so a subsequent `acquire`
    /// constructs anew and never observes a half-closed handle. Safe to call
    /// when absent; a second call in a row is a no-op.
    pub async fn release(&self) {
        let mut slot = self.slot.lock().await;
        let Some(session) = slot.take() else {
            tracing::debug!("Release with no shared session present");
            return;
        };

        let generation = session.generation();
        match session.close() {
            Ok(()) => tracing::info!(generation, "Shared session released"),
            Err(e) => tracing::warn!(generation, error = %e, "Shared session teardown incomplete"),
        }
        metrics::record_session_event("release");
    }

    /// Whether a session currently exists.
    pub async fn is_present(&self) -> bool {
        self.slot.lock().await.is_some()
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn acquire_is_idempotent() {
        let manager = SessionManager::new(SessionConfig::default());

        let first = manager.acquire().await.unwrap();
        let second = manager.acquire().await.unwrap();
        assert_eq!(first.generation(), second.generation());
        assert_eq!(first.generation(), 1);
    }

    #[tokio::test]
    async fn starts_absent_and_release_is_safe_when_absent() {
        let manager = SessionManager::new(SessionConfig::default());
        assert!(!manager.is_present().await);

        manager.release().await;
        assert!(!manager.is_present().await);
    }

    #[tokio::test]
    async fn invalid_user_agent_fails_construction() {
        let config = SessionConfig {
            user_agent: "finance-query\nbroken".into(),
            ..SessionConfig::default()
        };
        let manager = SessionManager::new(config);

        let err = manager.acquire().await.unwrap_err();
        assert!(matches!(err, SessionError::Initialization(_)));
        assert!(!manager.is_present().await);
    }
}
