//! Session context.
//!
//! Replaces the old client-side "isAuthenticated" flag: authentication is a
//! value carried through the application, not a boolean a page can flip.
//! Token verification stays server-side; the API client attaches the token
//! to every request when a session is present.

use serde::{Deserialize, Serialize};

/// An authenticated user context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Email shown in the navbar
    pub user_email: String,
    /// Opaque bearer token issued by the backend
    pub token: String,
}

impl Session {
    pub fn new(user_email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_email: user_email.into(),
            token: token.into(),
        }
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Whether the application currently has a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated(session) => Some(session),
        }
    }

    /// Email to display, when signed in.
    pub fn user_email(&self) -> Option<&str> {
        self.session().map(|s| s.user_email.as_str())
    }

    /// Drop the session.
    pub fn log_out(&mut self) {
        *self = AuthState::Anonymous;
    }
}
