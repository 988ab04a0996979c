//! # Session Registry
//!
//! Owns one [`Session`] per user identity, created on first contact.
//!
//! ## Thread Safety
//! The registry is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple transport events may arrive concurrently
//! 2. Only one event should mutate a session at a time
//! 3. Session transitions are cheap, so a single lock over the map suffices
//!
//! ## Generation Guard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Duplicate-Generation Guard                             │
//! │                                                                         │
//! │  Event A: Generate ──► try_begin_generation() ──► true  ──► renders    │
//! │  Event B: Generate ──► try_begin_generation() ──► false ──► rejected   │
//! │                          (while A's render is outstanding)              │
//! │  A finishes        ──► end_generation()        ──► flag cleared        │
//! │                                                                         │
//! │  The flag lives beside the session, not in it: the state machine       │
//! │  stays pure while the registry arbitrates concurrency.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tagpress_core::Session;

/// Transport-level user identity.
pub type UserId = i64;

struct Entry {
    session: Session,
    generating: bool,
}

impl Entry {
    fn new() -> Self {
        Entry {
            session: Session::new(),
            generating: false,
        }
    }
}

/// Shared map of user sessions.
#[derive(Clone)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<UserId, Entry>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        SessionRegistry {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Runs a closure against the user's session, creating a fresh session
    /// on first contact. The lock is held only for the closure.
    pub fn with_session<F, R>(&self, user: UserId, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut map = self.inner.lock().expect("Session registry mutex poisoned");
        let entry = map.entry(user).or_insert_with(Entry::new);
        f(&mut entry.session)
    }

    /// Attempts to claim the generation slot for this user.
    ///
    /// Returns `false` when a generation is already in flight; the caller
    /// must reject the request instead of starting a second render.
    pub fn try_begin_generation(&self, user: UserId) -> bool {
        let mut map = self.inner.lock().expect("Session registry mutex poisoned");
        let entry = map.entry(user).or_insert_with(Entry::new);
        if entry.generating {
            false
        } else {
            entry.generating = true;
            true
        }
    }

    /// Releases the generation slot. Must be called on every exit path of
    /// a claimed generation, success or failure.
    pub fn end_generation(&self, user: UserId) {
        let mut map = self.inner.lock().expect("Session registry mutex poisoned");
        if let Some(entry) = map.get_mut(&user) {
            entry.generating = false;
        }
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
