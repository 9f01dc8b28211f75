//! Session-scoped like/bookmark flags.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// How long an idle session keeps its flags.
pub const SESSION_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// Per-post engagement flags for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementFlags {
    pub liked: bool,
    pub bookmarked: bool,
}

struct Session {
    flags: HashMap<i64, EngagementFlags>,
    expires_at: Instant,
}

/// In-process store of per-visitor like/bookmark state.
///
/// This is an explicitly temporary mapping from (session id, post id) to
/// booleans: not persisted, not shared across instances or devices, gone
/// when the session expires. Toggling twice restores the original state.
/// The flags never influence the "popular posts" ranking.
pub struct EngagementService {
    sessions: RwLock<HashMap<String, Session>>,
    session_ttl: Duration,
}

impl EngagementService {
    pub fn new() -> Self {
        Self::with_ttl(SESSION_TTL)
    }

    pub fn with_ttl(session_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            session_ttl,
        }
    }

    /// Toggles the like flag; returns the new state.
    pub fn toggle_like(&self, session_id: &str, post_id: i64) -> bool {
        self.mutate(session_id, post_id, |flags| {
            flags.liked = !flags.liked;
            flags.liked
        })
    }

    /// Toggles the bookmark flag; returns the new state.
    pub fn toggle_bookmark(&self, session_id: &str, post_id: i64) -> bool {
        self.mutate(session_id, post_id, |flags| {
            flags.bookmarked = !flags.bookmarked;
            flags.bookmarked
        })
    }

    /// Current flags for a post in this session.
    pub fn flags(&self, session_id: &str, post_id: i64) -> EngagementFlags {
        let sessions = self.sessions.read().expect("session lock poisoned");
        match sessions.get(session_id) {
            Some(session) if session.expires_at > Instant::now() => session
                .flags
                .get(&post_id)
                .copied()
                .unwrap_or_default(),
            _ => EngagementFlags::default(),
        }
    }

    fn mutate<R>(
        &self,
        session_id: &str,
        post_id: i64,
        apply: impl FnOnce(&mut EngagementFlags) -> R,
    ) -> R {
        let mut sessions = self.sessions.write().expect("session lock poisoned");

        // Expired sessions are purged lazily on write access.
        let now = Instant::now();
        sessions.retain(|_, session| session.expires_at > now);

        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session {
                flags: HashMap::new(),
                expires_at: now + self.session_ttl,
            });
        session.expires_at = now + self.session_ttl;

        apply(session.flags.entry(post_id).or_default())
    }
}

impl Default for EngagementService {
    fn default() -> Self {
        Self::new()
    }
}
