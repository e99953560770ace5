//! In-memory registry of form sessions, keyed by the id carried in each page.
//!
//! The lock is held only for state transitions, never across the outbound
//! prediction request.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use surveycast_common::{Domain, SubmitError};
use surveycast_schema::{FormValues, ValidationReport};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::form::{FormError, FormSession};

/// A transition refused because the session already has a submission in
/// flight. Carries that session as it currently stands.
#[derive(Debug, Clone)]
pub struct Busy(pub FormSession);

pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, FormSession>>,
    ttl: chrono::Duration,
    /// Pending sessions outlive `ttl` by the request timeout.
    pending_ttl: chrono::Duration,
}

fn to_chrono(d: Duration) -> chrono::Duration {
    chrono::Duration::from_std(d).unwrap_or_else(|_| chrono::Duration::days(1))
}

impl SessionRegistry {
    pub fn new(ttl: Duration, request_timeout: Duration) -> Self {
        let ttl = to_chrono(ttl);
        Self {
            sessions: Mutex::new(HashMap::new()),
            pending_ttl: ttl + to_chrono(request_timeout),
            ttl,
        }
    }

    /// Start a new session with the given initial values.
    pub async fn open(&self, domain: Domain, defaults: FormValues) -> (Uuid, FormSession) {
        let id = Uuid::new_v4();
        let session = FormSession::new(domain, defaults);
        let mut sessions = self.sessions.lock().await;
        self.purge(&mut sessions, Utc::now());
        sessions.insert(id, session.clone());
        (id, session)
    }

    pub async fn get(&self, id: Uuid) -> Option<FormSession> {
        self.sessions.lock().await.get(&id).cloned()
    }

    pub async fn reject(
        &self,
        id: Uuid,
        domain: Domain,
        values: FormValues,
        report: ValidationReport,
    ) -> Result<FormSession, Busy> {
        let mut sessions = self.sessions.lock().await;
        self.purge(&mut sessions, Utc::now());
        let session = entry(&mut sessions, id, domain);
        match session.reject(values, report) {
            Ok(()) => Ok(session.clone()),
            Err(_) => Err(Busy(session.clone())),
        }
    }

    pub async fn begin_submit(
        &self,
        id: Uuid,
        domain: Domain,
        values: FormValues,
    ) -> Result<(), Busy> {
        let mut sessions = self.sessions.lock().await;
        self.purge(&mut sessions, Utc::now());
        let session = entry(&mut sessions, id, domain);
        session.begin_submit(values).map_err(|_| Busy(session.clone()))
    }

    pub async fn complete(
        &self,
        id: Uuid,
        result: Result<String, SubmitError>,
    ) -> Result<FormSession, FormError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(FormError::NotSubmitting)?;
        session.complete(result)?;
        Ok(session.clone())
    }

    /// Drop sessions last touched before `now - ttl`; pending ones get the
    /// request timeout on top. Returns how many were dropped.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        self.purge(&mut *self.sessions.lock().await, now)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn purge(&self, sessions: &mut HashMap<Uuid, FormSession>, now: DateTime<Utc>) -> usize {
        let before = sessions.len();
        let idle_cutoff = now - self.ttl;
        let pending_cutoff = now - self.pending_ttl;
        sessions.retain(|_, s| {
            let cutoff = if s.is_pending() { pending_cutoff } else { idle_cutoff };
            s.touched() >= cutoff
        });
        let dropped = before - sessions.len();
        if dropped > 0 {
            tracing::debug!(dropped, remaining = sessions.len(), "expired form sessions purged");
        }
        dropped
    }
}

/// Existing session for `id`, or a fresh one. A session opened for the other
/// domain is replaced.
fn entry(sessions: &mut HashMap<Uuid, FormSession>, id: Uuid, domain: Domain) -> &mut FormSession {
    let session = sessions
        .entry(id)
        .or_insert_with(|| FormSession::new(domain, FormValues::new()));
    if session.domain() != domain && !session.is_pending() {
        *session = FormSession::new(domain, FormValues::new());
    }
    session
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);
    const TIMEOUT: Duration = Duration::from_secs(30);

    fn registry() -> SessionRegistry {
        SessionRegistry::new(TTL, TIMEOUT)
    }

    #[tokio::test]
    async fn test_open_and_get() {
        let reg = registry();
        let (id, session) = reg.open(Domain::Bank, FormValues::new()).await;
        assert_eq!(session.domain(), Domain::Bank);
        assert!(reg.get(id).await.is_some());
        assert!(reg.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_id_starts_session() {
        let reg = registry();
        let id = Uuid::new_v4();
        reg.begin_submit(id, Domain::Health, FormValues::new()).await.unwrap();
        assert!(reg.get(id).await.unwrap().is_pending());
    }

    #[tokio::test]
    async fn test_pending_session_refuses_second_submit() {
        let reg = registry();
        let id = Uuid::new_v4();
        let mut first = FormValues::new();
        first.insert("age".to_string(), "40".to_string());
        reg.begin_submit(id, Domain::Bank, first).await.unwrap();

        let Busy(current) = reg.begin_submit(id, Domain::Bank, FormValues::new()).await.unwrap_err();
        assert!(current.is_pending());
        assert_eq!(current.values().get("age").map(String::as_str), Some("40"));

        let Busy(current) = reg
            .reject(id, Domain::Bank, FormValues::new(), ValidationReport::default())
            .await
            .unwrap_err();
        assert!(current.is_pending());

        let done = reg.complete(id, Ok("no".to_string())).await.unwrap();
        assert!(!done.is_pending());
        assert!(reg.begin_submit(id, Domain::Bank, FormValues::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_expired_sessions_are_purged_pending_get_grace() {
        let reg = registry();
        let (idle, _) = reg.open(Domain::Bank, FormValues::new()).await;
        let pending = Uuid::new_v4();
        reg.begin_submit(pending, Domain::Bank, FormValues::new()).await.unwrap();

        // Past the idle TTL, within TTL + request timeout.
        let later = Utc::now() + chrono::Duration::seconds(75);
        assert_eq!(reg.purge_expired(later).await, 1);
        assert!(reg.get(idle).await.is_none());
        assert!(reg.get(pending).await.is_some());

        let much_later = Utc::now() + chrono::Duration::seconds(120);
        assert_eq!(reg.purge_expired(much_later).await, 1);
        assert_eq!(reg.len().await, 0);
    }

    #[tokio::test]
    async fn test_reject_purges_expired() {
        let reg = SessionRegistry::new(Duration::ZERO, Duration::ZERO);
        for _ in 0..3 {
            reg.reject(Uuid::new_v4(), Domain::Bank, FormValues::new(), ValidationReport::default())
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        // Each reject clears the previous, now expired, entry.
        assert_eq!(reg.len().await, 1);
    }

    #[tokio::test]
    async fn test_complete_unknown_session() {
        let reg = registry();
        assert_eq!(
            reg.complete(Uuid::new_v4(), Ok("yes".to_string())).await.unwrap_err(),
            FormError::NotSubmitting
        );
    }
}
