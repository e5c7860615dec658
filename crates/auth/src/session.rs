//! Session holder: the boundary object between the external auth flow and
//! the RBAC core.
//!
//! Login, token refresh, and logout are driven from outside this crate; the
//! flow writes the current principal here and the core only reads it. There
//! is no ambient/global lookup: a `&Session` (or the snapshot taken from it)
//! is passed explicitly into each decision, so evaluation is testable
//! without any dependency-injection machinery.

use crate::Principal;

/// Holds the currently authenticated principal, if any.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<Principal>,
}

impl Session {
    /// Session with no authenticated principal.
    pub fn anonymous() -> Self {
        Self { current: None }
    }

    /// Session for an already-resolved principal (login / refresh path).
    pub fn authenticated(principal: Principal) -> Self {
        Self {
            current: Some(principal),
        }
    }

    /// Replace the current principal after login or token refresh.
    pub fn set_principal(&mut self, principal: Principal) {
        self.current = Some(principal);
    }

    /// Drop the current principal (logout, or refresh failure upstream).
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Whether there is a usable authenticated principal.
    ///
    /// A disabled principal is treated as not authenticated: the account
    /// exists but must not pass any gate.
    pub fn is_authenticated(&self) -> bool {
        self.current.as_ref().is_some_and(|p| p.enabled)
    }

    /// The current principal snapshot, if any.
    ///
    /// Returns the principal even when disabled; callers gating on
    /// authentication must use [`Session::is_authenticated`].
    pub fn principal(&self) -> Option<&Principal> {
        self.current.as_ref()
    }
}
