//! Local-first submission flow used by the invitation site.
//!
//! Every submission takes two independent legs. The local leg is
//! synchronous and authoritative for the session: the record lands in the
//! durable client cache (with a timestamp id) before the function returns,
//! and that success alone flips the UI to its submitted state. The remote
//! leg mirrors the submission to the backend in a background task; its
//! failure is logged, never retried, and never rolls back the local write.
//! The two outcomes stay distinct at the type level even though the
//! presentation ignores the remote one.
//!
//! Reads union the cached list with the remote list, de-duplicating by id
//! with local precedence. Local ids are client-clock timestamps while
//! remote ids are store-assigned sequence numbers, so a same-submission
//! pair does not share an id and cross-source collision remains possible;
//! de-duplication is only reliable within a single source.

mod cache;
mod remote;

pub use cache::*;
pub use remote::*;

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::errors::AppError;
use crate::models::{Badge, Memory, NewMemory, NewRsvp, Rsvp};

/// Result of the background mirror of a submission.
#[derive(Debug)]
pub enum RemoteOutcome<T> {
    /// The backend accepted the submission and returned its stored record.
    Accepted(T),
    /// The backend could not be reached or rejected the submission. The
    /// record exists only in the local cache.
    Failed(String),
}

/// An RSVP recorded locally, with its badge and the in-flight mirror.
pub struct RsvpSubmission {
    pub local: Rsvp,
    pub badge: Badge,
    pub remote: JoinHandle<RemoteOutcome<Rsvp>>,
}

/// A memory recorded locally, with the in-flight mirror.
pub struct MemorySubmission {
    pub local: Memory,
    pub remote: JoinHandle<RemoteOutcome<Memory>>,
}

/// Client-side submission and reading flows.
pub struct GuestClient {
    cache: LocalCache,
    remote: Arc<RemoteApi>,
}

impl GuestClient {
    pub fn new(store: Box<dyn KeyValueStore>, remote: RemoteApi) -> Self {
        Self {
            cache: LocalCache::new(store),
            remote: Arc::new(remote),
        }
    }

    /// Submit an RSVP. Must be called within a tokio runtime; the remote
    /// mirror is spawned onto it.
    pub fn submit_rsvp(&self, form: NewRsvp) -> Result<RsvpSubmission, AppError> {
        let insert = form
            .validate()
            .map_err(|errors| AppError::validation("Invalid RSVP data", errors))?;

        let now = Utc::now();
        let local = Rsvp {
            id: now.timestamp_millis(),
            full_name: insert.full_name,
            phone: insert.phone,
            guests: insert.guests,
            dietary: insert.dietary,
            message: insert.message,
            created_at: now.to_rfc3339(),
        };

        self.cache
            .push_rsvp(&local)
            .map_err(|err| AppError::Internal(format!("cache write failed: {}", err)))?;

        let badge = Badge::for_name(&local.full_name);
        self.cache
            .record_badge(&local.full_name, &badge)
            .map_err(|err| AppError::Internal(format!("cache write failed: {}", err)))?;

        let remote = Arc::clone(&self.remote);
        let handle = tokio::spawn(async move {
            match remote.submit_rsvp(&form).await {
                Ok(stored) => RemoteOutcome::Accepted(stored),
                Err(err) => {
                    tracing::warn!("background RSVP submission failed: {}", err);
                    RemoteOutcome::Failed(err.to_string())
                }
            }
        });

        Ok(RsvpSubmission {
            local,
            badge,
            remote: handle,
        })
    }

    /// Share a memory. The local copy keeps the submitted photo data URI;
    /// the backend resolves it to an object URL on its side.
    pub fn submit_memory(&self, form: NewMemory) -> Result<MemorySubmission, AppError> {
        let insert = form
            .validate()
            .map_err(|errors| AppError::validation("Invalid memory data", errors))?;

        let now = Utc::now();
        let local = Memory {
            id: now.timestamp_millis(),
            name: insert.name,
            message: insert.message,
            photo: insert.photo,
            created_at: now.to_rfc3339(),
        };

        self.cache
            .push_memory(&local)
            .map_err(|err| AppError::Internal(format!("cache write failed: {}", err)))?;

        let remote = Arc::clone(&self.remote);
        let handle = tokio::spawn(async move {
            match remote.submit_memory(&form).await {
                Ok(stored) => RemoteOutcome::Accepted(stored),
                Err(err) => {
                    tracing::warn!("background memory submission failed: {}", err);
                    RemoteOutcome::Failed(err.to_string())
                }
            }
        });

        Ok(MemorySubmission {
            local,
            remote: handle,
        })
    }

    /// All RSVPs visible to this client: the cached list unioned with the
    /// backend's, local entries winning on id collision. An unreachable
    /// backend degrades to the cached list alone.
    pub async fn rsvps(&self) -> Vec<Rsvp> {
        let local = self.cache.rsvps();
        let remote = match self.remote.list_rsvps().await {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!("could not fetch remote RSVPs: {}", err);
                Vec::new()
            }
        };
        merge_by_id(local, remote, |rsvp| rsvp.id)
    }

    /// All memories visible to this client, same merge as [`Self::rsvps`].
    pub async fn memories(&self) -> Vec<Memory> {
        let local = self.cache.memories();
        let remote = match self.remote.list_memories().await {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!("could not fetch remote memories: {}", err);
                Vec::new()
            }
        };
        merge_by_id(local, remote, |memory| memory.id)
    }

    /// Badge earned by a guest name, if one was recorded on this client.
    pub fn badge_for(&self, name: &str) -> Option<Badge> {
        self.cache.badges().remove(name)
    }
}

/// Union two record lists, dropping remote entries whose id already appears
/// locally. Local order is preserved, then remote order.
pub fn merge_by_id<T, K>(local: Vec<T>, remote: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T>
where
    K: Eq + Hash,
{
    let seen: HashSet<K> = local.iter().map(&key).collect();
    local
        .into_iter()
        .chain(remote.into_iter().filter(|item| !seen.contains(&key(item))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rsvp(id: i64, full_name: &str) -> Rsvp {
        Rsvp {
            id,
            full_name: full_name.to_string(),
            phone: "5551234567".to_string(),
            guests: 1,
            dietary: None,
            message: None,
            created_at: "2025-06-01T12:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_merge_prefers_local_on_id_collision() {
        let local = vec![rsvp(1, "Local Copy")];
        let remote = vec![rsvp(1, "Remote Copy"), rsvp(2, "Only Remote")];

        let merged = merge_by_id(local, remote, |r| r.id);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, 1);
        assert_eq!(merged[0].full_name, "Local Copy");
        assert_eq!(merged[1].id, 2);
    }

    #[test]
    fn test_merge_with_empty_sides() {
        let merged = merge_by_id(Vec::new(), vec![rsvp(5, "Remote")], |r| r.id);
        assert_eq!(merged.len(), 1);

        let merged = merge_by_id(vec![rsvp(5, "Local")], Vec::new(), |r| r.id);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].full_name, "Local");
    }

    #[tokio::test]
    async fn test_local_write_survives_unreachable_backend() {
        // Nothing listens here; the background mirror must fail without
        // disturbing the local record.
        let client = GuestClient::new(
            Box::new(MemoryStore::new()),
            RemoteApi::new("http://127.0.0.1:9"),
        );

        let form = NewRsvp {
            full_name: "Amari Lee".to_string(),
            phone: "5551234567".to_string(),
            guests: "2".to_string(),
            dietary: None,
            message: None,
        };

        let submission = client.submit_rsvp(form).expect("local leg should commit");
        assert_eq!(submission.local.guests, 2);

        let outcome = submission.remote.await.unwrap();
        assert!(matches!(outcome, RemoteOutcome::Failed(_)));

        // Read-side still shows the submission, from the cache alone.
        let visible = client.rsvps().await;
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].full_name, "Amari Lee");

        // The badge landed alongside it.
        let badge = client.badge_for("Amari Lee").expect("badge recorded");
        assert_eq!(badge.title, Badge::for_name("Amari Lee").title);
        assert_eq!(badge.color, Badge::for_name("Amari Lee").color);
    }

    #[tokio::test]
    async fn test_invalid_submission_never_reaches_the_cache() {
        let client = GuestClient::new(
            Box::new(MemoryStore::new()),
            RemoteApi::new("http://127.0.0.1:9"),
        );

        let form = NewRsvp {
            full_name: "A".to_string(),
            phone: "555".to_string(),
            guests: String::new(),
            dietary: None,
            message: None,
        };

        let err = client.submit_rsvp(form).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let visible = client.rsvps().await;
        assert!(visible.is_empty());
    }
}
