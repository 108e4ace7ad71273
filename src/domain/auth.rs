use serde::{Deserialize, Serialize};

/// Authenticated site owner. Presence means "logged in".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerSession {
    pub email: String,
}

/// Notification emitted whenever the session changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChange {
    SignedIn(OwnerSession),
    SignedOut,
}

impl AuthChange {
    /// The session that is current after this change.
    pub fn session(&self) -> Option<&OwnerSession> {
        match self {
            Self::SignedIn(session) => Some(session),
            Self::SignedOut => None,
        }
    }
}
