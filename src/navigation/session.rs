//! Application-wide authentication context.
//!
//! There is exactly one [`SessionWriter`]; it is moved into the auth-change
//! subscription. Every view reads through a cloned [`SessionContext`].

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::auth::{AuthChange, OwnerSession};

type Shared = Arc<RwLock<Option<OwnerSession>>>;

/// Read-only view of the current session.
#[derive(Clone, Debug)]
pub struct SessionContext {
    inner: Shared,
}

/// Sole writer of the session. Not `Clone`.
#[derive(Debug)]
pub struct SessionWriter {
    inner: Shared,
}

impl SessionContext {
    /// Creates an empty context and its writer.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (SessionWriter, SessionContext) {
        let inner: Shared = Arc::new(RwLock::new(None));
        (
            SessionWriter {
                inner: Arc::clone(&inner),
            },
            SessionContext { inner },
        )
    }

    pub fn current(&self) -> Option<OwnerSession> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl SessionWriter {
    pub fn apply(&self, change: &AuthChange) {
        let mut session = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *session = change.session().cloned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readers_observe_writer_changes() {
        let (writer, reader) = SessionContext::new();
        let other_reader = reader.clone();
        assert!(!reader.is_signed_in());

        writer.apply(&AuthChange::SignedIn(OwnerSession {
            email: "owner@example.com".into(),
        }));
        assert_eq!(
            other_reader.current().map(|s| s.email),
            Some("owner@example.com".to_string())
        );

        writer.apply(&AuthChange::SignedOut);
        assert!(!reader.is_signed_in());
    }
}
