//! The authenticated principal snapshot.

use serde::{Deserialize, Serialize};

use opsdash_core::UserId;

use crate::Role;

/// A fully resolved principal for authorization decisions.
///
/// This is an immutable snapshot: the external auth flow builds it after
/// login or token refresh, and every capability decision reads one snapshot
/// for its whole evaluation. The RBAC core never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub email: String,
    /// Unordered role set. May be empty; an empty set grants nothing.
    #[serde(default)]
    pub roles: Vec<Role>,
    pub enabled: bool,
}

impl Principal {
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// Set intersection over role identifiers.
    ///
    /// This is only the raw intersection; the "empty requirement means nobody
    /// qualifies" rule lives in [`crate::PermissionEvaluator::has_any_role`].
    pub fn has_any_role(&self, required: &[Role]) -> bool {
        required.iter().any(|role| self.roles.contains(role))
    }

    /// True iff the principal holds every role in `required`.
    ///
    /// An empty `required` is `false`, same as [`Principal::has_any_role`]
    /// through the evaluator: requirements must be explicit.
    pub fn has_all_roles(&self, required: &[Role]) -> bool {
        !required.is_empty() && required.iter().all(|role| self.roles.contains(role))
    }
}
